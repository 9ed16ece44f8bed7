use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";

/// TriggerEvent: the HTTP-shaped event a function
/// invocation receives, either lifted from a real HTTP
/// request or posted verbatim to `/invoke`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
}

impl TriggerEvent {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Empty values are treated as absent.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// TriggerResponse: what an invocation hands back.
/// `body` always holds a JSON document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl TriggerResponse {
    pub fn new(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN_HEADER.to_owned(), "*".to_owned());
        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
