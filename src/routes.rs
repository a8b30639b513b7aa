use axum::http::{Method, StatusCode};
use chrono::Utc;
use log::{debug, info};
use validator::Validate;

use types::domain::{Action, AuthRequest, AuthResponse};
use types::error::Error;

use crate::domain::request::{HandlerEvent, HandlerResponse, AUTH_CORS, DASHBOARD_CORS};
use crate::error::report_into_response;
use crate::service::auth::AuthService;
use crate::service::dashboard::DashboardService;

#[derive(Clone)]
pub struct Api {
    pub auth_service: AuthService,
    pub dashboard_service: DashboardService,
}

impl Api {
    /// Credential handler: login and registration.
    pub async fn auth(&self, event: HandlerEvent) -> HandlerResponse {
        match event.method() {
            Some(Method::OPTIONS) => HandlerResponse::preflight(AUTH_CORS),
            Some(Method::POST) => match self.authenticate(event.body_or_empty()).await {
                Ok((status, response)) => HandlerResponse::json(status, &response),
                Err(e) => report_into_response(e),
            },
            _ => report_into_response(Error::MethodNotAllowed),
        }
    }

    /// Mock data handler: dashboard analytics.
    pub fn merchant_data(&self, event: HandlerEvent) -> HandlerResponse {
        match event.method() {
            Some(Method::OPTIONS) => HandlerResponse::preflight(DASHBOARD_CORS),
            Some(Method::GET) => HandlerResponse::json(
                StatusCode::OK,
                &self.dashboard_service.snapshot(Utc::now().date_naive()),
            ),
            _ => report_into_response(Error::MethodNotAllowed),
        }
    }

    pub async fn authenticate(&self, body: &str) -> Result<(StatusCode, AuthResponse), Error> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|_| Error::InvalidBody)?;
        // positional arrays would otherwise fill the fields in order
        if !value.is_object() {
            return Err(Error::InvalidBody);
        }
        let request: AuthRequest =
            serde_json::from_value(value).map_err(|_| Error::InvalidBody)?;
        let credentials = request.credentials();
        credentials
            .validate()
            .map_err(|_| Error::MissingCredentials)?;
        let action = request.action()?;
        debug!("Handling {} for {}", action.as_ref(), credentials.email);

        match action {
            Action::Register => {
                let name = request.name();
                if name.is_empty() {
                    return Err(Error::MissingName);
                }
                let session = self
                    .auth_service
                    .register(name, credentials.email, credentials.password)
                    .await?;
                info!("User {} registered", session.user.id);
                Ok((
                    StatusCode::CREATED,
                    AuthResponse {
                        user: session.user.into(),
                        token: session.token,
                        message: "Registration successful".to_string(),
                    },
                ))
            }
            Action::Login => {
                let session = self
                    .auth_service
                    .login(credentials.email, credentials.password)
                    .await?;
                Ok((
                    StatusCode::OK,
                    AuthResponse {
                        user: session.user.into(),
                        token: session.token,
                        message: "Login successful".to_string(),
                    },
                ))
            }
        }
    }
}
