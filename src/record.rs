use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsValue};
use thiserror::Error;

/// Primary key of a student record.
pub const STUDENT_ID: &str = "studentID";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";

/// A registered student.
///
/// Arbitrary JSON fields are kept as-is; only `studentID`, `firstName`
/// and `lastName` are required, and all three must be strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Map<String, JsValue>",
    into = "Map<String, JsValue>"
)]
pub struct StudentRecord(Map<String, JsValue>);

impl StudentRecord {
    pub fn from_json(body: &str) -> Result<Self, ValidationError> {
        let value: JsValue = serde_json::from_str(body).map_err(ValidationError::Malformed)?;
        Self::try_from(value)
    }

    pub fn from_fields(fields: Map<String, JsValue>) -> Result<Self, ValidationError> {
        let id = required_str(&fields, STUDENT_ID)?;
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        required_str(&fields, FIRST_NAME)?;
        required_str(&fields, LAST_NAME)?;
        Ok(Self(fields))
    }

    pub fn student_id(&self) -> &str {
        self.str_field(STUDENT_ID)
    }

    pub fn first_name(&self) -> &str {
        self.str_field(FIRST_NAME)
    }

    pub fn last_name(&self) -> &str {
        self.str_field(LAST_NAME)
    }

    pub fn fields(&self) -> &Map<String, JsValue> {
        &self.0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    // Required fields are checked at construction.
    fn str_field(&self, key: &str) -> &str {
        self.0.get(key).and_then(JsValue::as_str).unwrap_or_default()
    }
}

impl TryFrom<JsValue> for StudentRecord {
    type Error = ValidationError;

    fn try_from(value: JsValue) -> Result<Self, Self::Error> {
        match value {
            JsValue::Object(fields) => Self::from_fields(fields),
            _ => Err(ValidationError::NotAnObject),
        }
    }
}

impl TryFrom<Map<String, JsValue>> for StudentRecord {
    type Error = ValidationError;

    fn try_from(fields: Map<String, JsValue>) -> Result<Self, Self::Error> {
        Self::from_fields(fields)
    }
}

impl From<StudentRecord> for Map<String, JsValue> {
    fn from(record: StudentRecord) -> Self {
        record.0
    }
}

impl From<StudentRecord> for JsValue {
    fn from(record: StudentRecord) -> Self {
        JsValue::Object(record.0)
    }
}

fn required_str<'a>(fields: &'a Map<String, JsValue>, key: &'static str) -> Result<&'a str, ValidationError> {
    match fields.get(key) {
        None | Some(JsValue::Null) => Err(ValidationError::MissingField(key)),
        Some(JsValue::String(value)) => Ok(value.as_str()),
        Some(_) => Err(ValidationError::NotAString(key)),
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("request body is missing")]
    MissingBody,
    #[error("request body is not valid UTF-8: {0}")]
    NotUtf8(std::str::Utf8Error),
    #[error("request body is not valid JSON: {0}")]
    Malformed(serde_json::Error),
    #[error("student record must be a JSON object")]
    NotAnObject,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("field {0} must be a string")]
    NotAString(&'static str),
    #[error("studentID must not be empty")]
    EmptyId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_record_and_keeps_extra_fields() {
        let record = StudentRecord::from_json(
            r#"{"studentID":"S1","firstName":"Ada","lastName":"Lovelace","year":2}"#,
        )
        .unwrap();
        assert_eq!(record.student_id(), "S1");
        assert_eq!(record.first_name(), "Ada");
        assert_eq!(record.last_name(), "Lovelace");
        assert_eq!(record.fields().get("year"), Some(&json!(2)));
    }

    #[test]
    fn rejects_missing_student_id() {
        let err = StudentRecord::from_json(r#"{"firstName":"Ada","lastName":"Lovelace"}"#)
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(STUDENT_ID)));
    }

    #[test]
    fn rejects_unparsable_json() {
        let err = StudentRecord::from_json("{not json").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn rejects_non_object_and_bad_types() {
        assert!(matches!(
            StudentRecord::try_from(json!(["S1"])),
            Err(ValidationError::NotAnObject)
        ));
        assert!(matches!(
            StudentRecord::try_from(json!({"studentID": 1, "firstName": "A", "lastName": "B"})),
            Err(ValidationError::NotAString(STUDENT_ID))
        ));
        assert!(matches!(
            StudentRecord::try_from(json!({"studentID": "", "firstName": "A", "lastName": "B"})),
            Err(ValidationError::EmptyId)
        ));
        assert!(matches!(
            StudentRecord::try_from(json!({"studentID": "S1", "firstName": null, "lastName": "B"})),
            Err(ValidationError::MissingField(FIRST_NAME))
        ));
    }

    #[test]
    fn decoding_enforces_required_fields() {
        let decoded: Result<StudentRecord, _> =
            serde_json::from_str(r#"{"firstName":"Ada","lastName":"Lovelace"}"#);
        let err = decoded.unwrap_err();
        assert!(err.to_string().contains("missing required field: studentID"));

        let record: StudentRecord = serde_json::from_str(
            r#"{"studentID":"S1","firstName":"Ada","lastName":"Lovelace","year":2}"#,
        )
        .unwrap();
        assert_eq!(record.student_id(), "S1");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"studentID": "S1", "firstName": "Ada", "lastName": "Lovelace", "year": 2})
        );
    }
}
