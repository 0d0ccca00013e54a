pub mod error;
pub mod response;
pub mod store;
pub mod visitor;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{debug, error, info};

pub use crate::error::VisitorLogError;
pub use crate::response::{CorsConfig, HandlerResponse, ResponseConfig};
pub use crate::store::{DynamoStore, VisitorStore};
pub use crate::visitor::{Item, VisitorLog};

pub const TABLE_NAME: &str = "VisitorLogs";
pub const REGION: &str = "us-east-1";

/// Pulls the visitor record out of the event's `body` text.
pub fn parse_visitor(event: &Value) -> Result<VisitorLog, VisitorLogError> {
    let body = match event.get("body") {
        Some(Value::String(body)) => body,
        _ => {
            error!("Error: no body found in the event");
            return Err(VisitorLogError::InvalidRequest);
        }
    };
    VisitorLog::from_json(body).map_err(|e| {
        error!("Error decoding JSON: {}", e);
        VisitorLogError::InvalidRequest
    })
}

/// Parses, timestamps and stores one visit. Nothing is written unless the
/// body parsed.
pub async fn handle<S: VisitorStore + ?Sized>(
    store: &S,
    event: &Value,
) -> Result<HandlerResponse, VisitorLogError> {
    let mut visitor = parse_visitor(event)?;
    visitor.stamp_now();

    if let Err(e) = store.put_item(TABLE_NAME, visitor.to_item()).await {
        error!("Failed to put item in DynamoDB: {}", e);
        return Err(VisitorLogError::InternalError);
    }
    info!("stored visit from {} at {}", visitor.ip, visitor.timestamp);

    Ok(ResponseConfig::stored().build())
}

pub async fn function_handler<S: VisitorStore + ?Sized>(
    store: &S,
    event: LambdaEvent<Value>,
) -> Result<HandlerResponse, Error> {
    debug!("log_visitor request {}: {:?}", event.context.request_id, event.payload);
    Ok(handle(store, &event.payload).await?)
}

#[test]
fn test_parse_visitor() {
    let event = serde_json::json!({"body": "{\"IP\":\"203.0.113.5\"}"});
    assert_eq!(parse_visitor(&event).unwrap(), VisitorLog::new("203.0.113.5"));
}

#[test]
fn test_parse_visitor_lowercase_key() {
    let event = serde_json::json!({"body": "{\"ip\":\"203.0.113.5\"}"});
    assert_eq!(parse_visitor(&event).unwrap(), VisitorLog::new("203.0.113.5"));
}

#[test]
fn test_parse_visitor_ignores_extra_fields() {
    let event = serde_json::json!({
        "body": "{\"IP\":\"::1\",\"Timestamp\":\"2001-01-01 00:00:00\",\"agent\":\"curl\"}",
        "headers": {"Host": "example.com"}
    });
    assert_eq!(parse_visitor(&event).unwrap(), VisitorLog::new("::1"));
}

#[test]
fn test_parse_visitor_accepts_any_ip_text() {
    let event = serde_json::json!({"body": "{\"IP\":\"not an address\"}"});
    assert_eq!(parse_visitor(&event).unwrap().ip, "not an address");
}

#[test]
fn test_parse_visitor_bad_events() {
    use serde_json::json;
    let events = [
        json!({}),
        json!({"body": null}),
        json!({"body": 12}),
        json!({"body": {"IP": "203.0.113.5"}}),
        json!({"body": ""}),
        json!({"body": "not json"}),
        json!({"body": "{}"}),
        json!({"body": "{\"IP\":null}"}),
        json!({"body": "{\"IP\":7}"}),
        json!({"body": "{\"IP\":\"::1\",\"Timestamp\":42}"}),
        json!({"body": "\"203.0.113.5\""}),
        json!("body"),
    ];
    for event in events.iter() {
        assert_eq!(
            parse_visitor(event),
            Err(VisitorLogError::InvalidRequest),
            "event {} should be rejected",
            event
        );
    }
}
