//! DynamoDB-backed student table.
//!
//! Records are stored as items whose partition key is the string
//! attribute `studentID`. JSON values map onto attribute values
//! one-to-one: objects become maps, arrays become lists, numbers keep
//! their decimal text.

use super::{StoreError, StudentStore};
use crate::record::{StudentRecord, STUDENT_ID};
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use axum::async_trait;
use serde_json::{Map, Number, Value as JsValue};
use std::collections::HashMap;

pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: &str) -> Self {
        Self {
            client,
            table: table.to_owned(),
        }
    }

    /// Credentials and region come from the standard AWS environment chain.
    pub async fn from_env(table: &str) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config), table)
    }
}

#[async_trait]
impl StudentStore for DynamoStore {
    async fn put(&self, record: &StudentRecord) -> Result<(), StoreError> {
        let item = to_item(record);
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn get(&self, student_id: &str) -> Result<Option<StudentRecord>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(STUDENT_ID, AttributeValue::S(student_id.to_owned()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;
        match output.item() {
            Some(item) => from_item(student_id, item).map(Some),
            None => Ok(None),
        }
    }
}

fn to_item(record: &StudentRecord) -> HashMap<String, AttributeValue> {
    record
        .fields()
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute(value)))
        .collect()
}

fn to_attribute(value: &JsValue) -> AttributeValue {
    match value {
        JsValue::Null => AttributeValue::Null(true),
        JsValue::Bool(b) => AttributeValue::Bool(*b),
        JsValue::Number(n) => AttributeValue::N(n.to_string()),
        JsValue::String(s) => AttributeValue::S(s.clone()),
        JsValue::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
        JsValue::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), to_attribute(value)))
                .collect(),
        ),
    }
}

fn from_item(
    key: &str,
    item: &HashMap<String, AttributeValue>,
) -> Result<StudentRecord, StoreError> {
    let mut fields = Map::new();
    for (name, attribute) in item {
        fields.insert(name.clone(), from_attribute(key, attribute)?);
    }
    serde_json::from_value(JsValue::Object(fields)).map_err(|source| StoreError::Corrupt {
        key: key.to_owned(),
        source,
    })
}

fn from_attribute(key: &str, attribute: &AttributeValue) -> Result<JsValue, StoreError> {
    let unsupported = |kind: &str| StoreError::UnsupportedAttribute {
        key: key.to_owned(),
        attribute: kind.to_owned(),
    };
    let value: JsValue = match attribute {
        AttributeValue::Null(_) => JsValue::Null,
        AttributeValue::Bool(b) => JsValue::Bool(*b),
        AttributeValue::N(n) => parse_number(n).ok_or_else(|| unsupported("N"))?,
        AttributeValue::S(s) => JsValue::String(s.clone()),
        AttributeValue::Ss(set) => set.iter().cloned().map(JsValue::String).collect(),
        AttributeValue::Ns(set) => set
            .iter()
            .map(|n| parse_number(n).ok_or_else(|| unsupported("NS")))
            .collect::<Result<Vec<_>, _>>()?
            .into(),
        AttributeValue::L(items) => items
            .iter()
            .map(|item| from_attribute(key, item))
            .collect::<Result<Vec<_>, _>>()?
            .into(),
        AttributeValue::M(fields) => {
            let mut map = Map::new();
            for (name, value) in fields {
                map.insert(name.clone(), from_attribute(key, value)?);
            }
            JsValue::Object(map)
        }
        AttributeValue::B(_) => return Err(unsupported("B")),
        AttributeValue::Bs(_) => return Err(unsupported("BS")),
        _ => return Err(unsupported("unknown")),
    };
    Ok(value)
}

fn parse_number(text: &str) -> Option<JsValue> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(n.into());
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(JsValue::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_values_survive_conversion() {
        let record = StudentRecord::try_from(json!({
            "studentID": "S1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "gpa": 3.9,
            "credits": 120,
            "active": true,
            "advisor": null,
            "courses": [{"code": "MATH101", "grades": [90, 95]}]
        }))
        .unwrap();

        let item = to_item(&record);
        assert_eq!(item[STUDENT_ID], AttributeValue::S("S1".to_owned()));
        assert_eq!(from_item("S1", &item).unwrap(), record);
    }

    #[test]
    fn binary_attributes_are_rejected() {
        let mut item = HashMap::new();
        item.insert(STUDENT_ID.to_owned(), AttributeValue::S("S1".to_owned()));
        item.insert(
            "photo".to_owned(),
            AttributeValue::B(aws_sdk_dynamodb::primitives::Blob::new(vec![1, 2])),
        );
        let err = from_item("S1", &item).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedAttribute { .. }));
    }
}
