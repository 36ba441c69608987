//! Serverless-function deployment of the recipe endpoint.
//!
//! Events and responses use the Netlify Functions JSON shape.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::{dispatch, EndpointRequest, EndpointResponse, HttpAdapter, RecipeService};
use crate::error::Result;

pub const FUNCTION_PATH: &str = "/.netlify/functions/recipe";

/// Incoming function event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Function result handed back to the platform
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Adapter between function events and the endpoint
pub struct FunctionAdapter;

impl HttpAdapter for FunctionAdapter {
    type Request = FunctionEvent;
    type Response = FunctionResponse;

    fn receive(event: Self::Request) -> EndpointRequest {
        let body = match event.body {
            Some(body) if event.is_base64_encoded => match decode_body(&body) {
                Some(decoded) => Some(decoded),
                None => {
                    warn!("Ignoring function body that is not valid base64 UTF-8");
                    None
                }
            },
            body => body,
        };

        EndpointRequest {
            method: event.http_method,
            body,
        }
    }

    fn send(response: EndpointResponse) -> Self::Response {
        // Header names in canonical casing
        let headers = response
            .headers
            .into_iter()
            .map(|(name, value)| (canonical_header_name(name), value.to_string()))
            .collect();

        FunctionResponse {
            status_code: response.status,
            headers,
            body: response.body,
        }
    }
}

/// Handle one function event
pub async fn handler(service: &RecipeService, event: FunctionEvent) -> FunctionResponse {
    dispatch::<FunctionAdapter>(service, event).await
}

/// Read one event as JSON from `input` and return the response as JSON
pub async fn run_once<R: AsyncRead + Unpin>(service: &RecipeService, mut input: R) -> Result<String> {
    let mut raw = String::new();
    input.read_to_string(&mut raw).await?;

    let event: FunctionEvent = serde_json::from_str(&raw)?;
    let response = handler(service, event).await;

    Ok(serde_json::to_string(&response)?)
}

fn decode_body(body: &str) -> Option<String> {
    let bytes = STANDARD.decode(body.trim()).ok()?;
    String::from_utf8(bytes).ok()
}

/// `access-control-allow-origin` -> `Access-Control-Allow-Origin`
fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::tests::StubProvider;
    use std::sync::Arc;

    fn event(method: &str, body: Option<&str>) -> FunctionEvent {
        FunctionEvent {
            http_method: method.to_string(),
            body: body.map(str::to_string),
            is_base64_encoded: false,
        }
    }

    #[test]
    fn test_canonical_header_name() {
        assert_eq!(
            canonical_header_name("access-control-allow-origin"),
            "Access-Control-Allow-Origin"
        );
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
    }

    #[test]
    fn test_event_deserializes_from_platform_json() {
        let event: FunctionEvent = serde_json::from_str(
            r#"{"httpMethod": "POST", "body": "{\"ingredients\":[\"egg\"]}", "path": "/.netlify/functions/recipe"}"#,
        )
        .unwrap();

        assert_eq!(event.http_method, "POST");
        assert!(!event.is_base64_encoded);
        assert_eq!(event.body.as_deref(), Some(r#"{"ingredients":["egg"]}"#));
    }

    #[test]
    fn test_receive_decodes_base64_body() {
        let encoded = STANDARD.encode(r#"{"ingredients":["egg"]}"#);
        let request = FunctionAdapter::receive(FunctionEvent {
            http_method: "POST".to_string(),
            body: Some(encoded),
            is_base64_encoded: true,
        });
        assert_eq!(request.body.as_deref(), Some(r#"{"ingredients":["egg"]}"#));

        let request = FunctionAdapter::receive(FunctionEvent {
            http_method: "POST".to_string(),
            body: Some("%%%".to_string()),
            is_base64_encoded: true,
        });
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_handler_success_and_headers() {
        let service = RecipeService::new(Arc::new(StubProvider::answering("Tea")));
        let response = handler(
            &service,
            event("POST", Some(r#"{"ingredients":["tea","water","honey"]}"#)),
        )
        .await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, r#"{"recipe":"Tea"}"#);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Content-Type"], "application/json");
    }

    #[tokio::test]
    async fn test_handler_preflight_and_method_checks() {
        let service = RecipeService::new(Arc::new(StubProvider::answering("unused")));

        let response = handler(&service, event("OPTIONS", None)).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "");
        assert_eq!(
            response.headers["Access-Control-Allow-Methods"],
            "POST, OPTIONS"
        );
        assert_eq!(
            response.headers["Access-Control-Allow-Headers"],
            "Content-Type"
        );

        let response = handler(&service, event("GET", None)).await;
        assert_eq!(response.status_code, 405);

        let response = handler(&service, event("POST", None)).await;
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn test_run_once_reads_async_input() {
        let service = RecipeService::new(Arc::new(StubProvider::answering("Tea")));
        let (mut writer, reader) = tokio::io::duplex(64);

        let feed = tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            let event = r#"{"httpMethod":"POST","body":"{\"ingredients\":[\"tea\"]}"}"#;
            for chunk in event.as_bytes().chunks(16) {
                writer.write_all(chunk).await.unwrap();
            }
        });

        let output = run_once(&service, reader).await.unwrap();
        feed.await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["body"], r#"{"recipe":"Tea"}"#);
    }

    #[tokio::test]
    async fn test_run_once_round_trips_json() {
        let service = RecipeService::new(Arc::new(StubProvider::failing("boom")));
        let input = r#"{"httpMethod":"POST","body":"{\"ingredients\":[\"egg\"]}"}"#;

        let output = run_once(&service, input.as_bytes()).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["statusCode"], 500);
        assert_eq!(value["body"], r#"{"error":"Failed to generate recipe"}"#);
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
    }
}
