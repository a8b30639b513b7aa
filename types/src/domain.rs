use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use uuid::Uuid;
use validator::Validate;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Login,
    Register,
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Action::Login),
            "register" => Ok(Action::Register),
            _ => Err(Error::InvalidAction),
        }
    }
}

/// Body accepted by the auth endpoint. Every field is optional on the wire so
/// that missing values surface as validation errors rather than parse errors.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct AuthRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AuthRequest {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        AuthRequest {
            action: Some(Action::Login.as_ref().to_string()),
            email: Some(email.into()),
            password: Some(password.into()),
            name: None,
        }
    }

    pub fn register(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        AuthRequest {
            action: Some(Action::Register.as_ref().to_string()),
            email: Some(email.into()),
            password: Some(password.into()),
            name: Some(name.into()),
        }
    }

    /// Absent action means login.
    pub fn action(&self) -> Result<Action, Error> {
        self.action
            .as_deref()
            .map_or(Ok(Action::Login), Action::from_str)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self
                .email
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            password: self.password.clone().unwrap_or_default(),
        }
    }

    pub fn name(&self) -> String {
        self.name.as_deref().unwrap_or_default().trim().to_string()
    }
}

/// Normalized email and password.
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserView,
    pub token: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<Error> for ErrorBody {
    fn from(error: Error) -> Self {
        ErrorBody {
            error: error.to_string(),
        }
    }
}
