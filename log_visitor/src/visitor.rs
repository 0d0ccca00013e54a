use aws_sdk_dynamodb::model::AttributeValue;
use chrono::{Local, NaiveDateTime};
use serde::de::Error as _;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const IP_FIELD: &str = "IP";
const TIMESTAMP_FIELD: &str = "Timestamp";

/// A DynamoDB item, keyed by attribute name.
pub type Item = HashMap<String, AttributeValue>;

/// One visit, as stored in the `VisitorLogs` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorLog {
    pub ip: String,
    /// Always assigned server side; whatever the client sent is dropped.
    pub timestamp: String,
}

/// Looks a field up by exact name first, then ignoring ASCII case.
fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

impl VisitorLog {
    pub fn new<T: Into<String>>(ip: T) -> Self {
        Self {
            ip: ip.into(),
            timestamp: String::new(),
        }
    }

    /// Decodes a request body of the form `{"IP": "<text>"}`. Field names
    /// match case-insensitively and unknown fields are ignored. A
    /// client-sent `Timestamp` must be a string (or null) and is discarded.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let fields: Map<String, Value> = serde_json::from_str(body)?;
        match field(&fields, TIMESTAMP_FIELD) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => {
                return Err(serde_json::Error::custom(format!(
                    "invalid type for field `{}`: {}, expected a string",
                    TIMESTAMP_FIELD, other
                )))
            }
        }
        match field(&fields, IP_FIELD) {
            Some(Value::String(ip)) => Ok(Self::new(ip.as_str())),
            Some(other) => Err(serde_json::Error::custom(format!(
                "invalid type for field `{}`: {}, expected a string",
                IP_FIELD, other
            ))),
            None => Err(serde_json::Error::custom(format!("missing field `{}`", IP_FIELD))),
        }
    }

    pub fn stamp(&mut self, now: NaiveDateTime) {
        self.timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    }

    /// Stamps the record with the local wall-clock time of the execution
    /// environment.
    pub fn stamp_now(&mut self) {
        self.stamp(Local::now().naive_local())
    }

    pub fn to_item(&self) -> Item {
        HashMap::from([
            (String::from(IP_FIELD), AttributeValue::S(self.ip.to_owned())),
            (String::from(TIMESTAMP_FIELD), AttributeValue::S(self.timestamp.to_owned())),
        ])
    }
}

#[cfg(test)]
fn fixed_time() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(7, 5, 1)
        .unwrap()
}

#[test]
fn test_stamp_format() {
    let mut visitor = VisitorLog::new("203.0.113.5");
    visitor.stamp(fixed_time());
    assert_eq!(visitor.timestamp, "2024-03-09 07:05:01");
}

#[test]
fn test_stamp_now_parses_back() {
    let mut visitor = VisitorLog::new("203.0.113.5");
    visitor.stamp_now();
    assert_eq!(visitor.timestamp.len(), 19);
    assert!(NaiveDateTime::parse_from_str(&visitor.timestamp, TIMESTAMP_FORMAT).is_ok());
}

#[test]
fn test_from_json_field_case() {
    assert_eq!(VisitorLog::from_json(r#"{"ip":"10.0.0.1"}"#).unwrap(), VisitorLog::new("10.0.0.1"));
    assert_eq!(VisitorLog::from_json(r#"{"Ip":"10.0.0.2"}"#).unwrap(), VisitorLog::new("10.0.0.2"));
    // exact name wins over a case-folded one
    assert_eq!(
        VisitorLog::from_json(r#"{"ip":"10.0.0.3","IP":"10.0.0.4"}"#).unwrap(),
        VisitorLog::new("10.0.0.4")
    );
}

#[test]
fn test_from_json_client_timestamp() {
    let visitor =
        VisitorLog::from_json(r#"{"IP":"10.0.0.1","Timestamp":"1999-01-01 00:00:00"}"#).unwrap();
    assert_eq!(visitor, VisitorLog::new("10.0.0.1"));
    let visitor = VisitorLog::from_json(r#"{"IP":"10.0.0.1","timestamp":null}"#).unwrap();
    assert_eq!(visitor, VisitorLog::new("10.0.0.1"));
    assert!(VisitorLog::from_json(r#"{"IP":"10.0.0.1","Timestamp":42}"#).is_err());
    assert!(VisitorLog::from_json(r#"{"IP":"10.0.0.1","TIMESTAMP":{}}"#).is_err());
}

#[test]
fn test_from_json_rejects() {
    for body in ["", "[]", "\"10.0.0.1\"", "{}", r#"{"IP":null}"#, r#"{"IP":7}"#, r#"{"addr":"10.0.0.1"}"#] {
        assert!(VisitorLog::from_json(body).is_err(), "body {} should be rejected", body);
    }
}

#[test]
fn test_to_item() {
    let mut visitor = VisitorLog::new("203.0.113.5");
    visitor.stamp(fixed_time());
    let item = visitor.to_item();
    assert_eq!(item.len(), 2);
    assert_eq!(item.get("IP"), Some(&AttributeValue::S("203.0.113.5".to_string())));
    assert_eq!(
        item.get("Timestamp"),
        Some(&AttributeValue::S("2024-03-09 07:05:01".to_string()))
    );
}
