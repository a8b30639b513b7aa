use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use log::error;
use tap::TapFallible;

use types::error::Error;

use crate::domain::request::{HandlerEvent, HandlerResponse};
use crate::error::report_into_response;

/// Turns an HTTP request into the event a handler expects.
#[derive(Debug, Clone)]
pub struct ExtractEvent(pub HandlerEvent);

impl<S> FromRequest<S> for ExtractEvent
where
    S: Send + Sync,
{
    type Rejection = HandlerResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let http_method = req.method().to_string();
        let headers: HashMap<String, String> = req
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();

        let body = String::from_request(req, state)
            .await
            .tap_err(|e| error!("Failed to read request body: {}", e))
            .map_err(|_| report_into_response(Error::InvalidBody))?;

        Ok(ExtractEvent(HandlerEvent {
            http_method,
            body: Some(body),
            headers,
        }))
    }
}
