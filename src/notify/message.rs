use crate::record::StudentRecord;
use serde::Deserialize;

/// Wording used for the two notification channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageFormat {
    /// Per-channel messages listing the ID and full name.
    #[default]
    Detailed,
    /// One short line shared by both channels.
    Summary,
}

impl MessageFormat {
    pub fn webhook_text(&self, record: &StudentRecord) -> String {
        match self {
            Self::Detailed => format!(
                ":tada: *New Student Registered!*\n*ID:* {}\n*Name:* {} {}",
                record.student_id(),
                record.first_name(),
                record.last_name()
            ),
            Self::Summary => summary(record),
        }
    }

    pub fn pubsub_text(&self, record: &StudentRecord) -> String {
        match self {
            Self::Detailed => format!(
                "New student has been registered:\n\nID: {}\nName: {} {}",
                record.student_id(),
                record.first_name(),
                record.last_name()
            ),
            Self::Summary => summary(record),
        }
    }
}

fn summary(record: &StudentRecord) -> String {
    let name = format!("{} {}", record.first_name(), record.last_name());
    format!(":tada: A new student has registered: {}!", name.trim())
}
