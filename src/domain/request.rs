use std::collections::{BTreeMap, HashMap};

use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use log::error;
use serde::{Deserialize, Serialize};

use types::domain::ErrorBody;

/// A single invocation as delivered by the hosting runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_method() -> String {
    Method::GET.to_string()
}

impl HandlerEvent {
    #[cfg(test)]
    pub fn new(method: Method, body: impl Into<String>) -> Self {
        HandlerEvent {
            http_method: method.to_string(),
            body: Some(body.into()),
            headers: HashMap::new(),
        }
    }

    /// Method names are case-sensitive, so `"options"` is not a preflight.
    pub fn method(&self) -> Option<Method> {
        Method::from_bytes(self.http_method.as_bytes()).ok()
    }

    /// Body text, with a missing or blank body read as an empty object.
    pub fn body_or_empty(&self) -> &str {
        match self.body.as_deref() {
            Some(body) if !body.trim().is_empty() => body,
            _ => "{}",
        }
    }
}

/// What a handler hands back to the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Preflight answer advertised by one handler.
#[derive(Debug, Clone, Copy)]
pub struct CorsPolicy {
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
}

pub const AUTH_CORS: CorsPolicy = CorsPolicy {
    allow_methods: "POST, OPTIONS",
    allow_headers: "Content-Type, X-Auth-Token",
};

pub const DASHBOARD_CORS: CorsPolicy = CorsPolicy {
    allow_methods: "GET, OPTIONS",
    allow_headers: "Content-Type, X-User-Id, X-Auth-Token, X-Session-Id",
};

const PREFLIGHT_MAX_AGE: &str = "86400";

fn base_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ])
}

impl HandlerResponse {
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => HandlerResponse {
                status_code: status.as_u16(),
                headers: base_headers(),
                body,
                is_base64_encoded: false,
            },
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self::json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorBody {
                        error: format!("Server error: {}", e),
                    },
                )
            }
        }
    }

    pub fn preflight(policy: CorsPolicy) -> Self {
        let mut headers = base_headers();
        headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            policy.allow_methods.to_string(),
        );
        headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            policy.allow_headers.to_string(),
        );
        headers.insert(
            "Access-Control-Max-Age".to_string(),
            PREFLIGHT_MAX_AGE.to_string(),
        );
        HandlerResponse {
            status_code: StatusCode::OK.as_u16(),
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, self.body).into_response();
        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => error!("Dropping invalid response header {}", name),
            }
        }
        response
    }
}
