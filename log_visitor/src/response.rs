use serde::Serialize;
use std::collections::BTreeMap;

pub const STORED_STATUS: u16 = 200;
pub const STORED_BODY: &str = "Visitor log stored successfully";

/// Response handed back to API Gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

/// Cross-origin headers attached to every successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allow_origin: &'static str,
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
}

impl CorsConfig {
    /// Any origin may `GET`, `POST` or preflight with a `Content-Type` header.
    pub fn permissive() -> Self {
        Self {
            allow_origin: "*",
            allow_methods: "GET, POST, OPTIONS",
            allow_headers: "Content-Type",
        }
    }

    pub fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (String::from("Access-Control-Allow-Origin"), self.allow_origin.to_string()),
            (String::from("Access-Control-Allow-Methods"), self.allow_methods.to_string()),
            (String::from("Access-Control-Allow-Headers"), self.allow_headers.to_string()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseConfig {
    pub status_code: u16,
    pub body: &'static str,
    pub cors: CorsConfig,
}

impl ResponseConfig {
    pub fn stored() -> Self {
        Self {
            status_code: STORED_STATUS,
            body: STORED_BODY,
            cors: CorsConfig::permissive(),
        }
    }

    pub fn build(&self) -> HandlerResponse {
        HandlerResponse {
            status_code: self.status_code,
            body: self.body.to_string(),
            headers: self.cors.headers(),
        }
    }
}

#[test]
fn test_stored_response() {
    let response = ResponseConfig::stored().build();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "Visitor log stored successfully");
    assert_eq!(response.headers.len(), 3);
    assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(response.headers["Access-Control-Allow-Methods"], "GET, POST, OPTIONS");
    assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
}

#[test]
fn test_response_json_shape() {
    let json = serde_json::to_value(ResponseConfig::stored().build()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "statusCode": 200,
            "body": "Visitor log stored successfully",
            "headers": {
                "Access-Control-Allow-Origin": "*",
                "Access-Control-Allow-Methods": "GET, POST, OPTIONS",
                "Access-Control-Allow-Headers": "Content-Type"
            }
        })
    );
}
