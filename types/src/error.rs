use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Invalid action")]
    InvalidAction,
    #[error("Name is required")]
    MissingName,
    #[error("User with this email already exists")]
    EmailAlreadyExists,
    #[error("Invalid email or password")]
    InvalidEmailOrPassword,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Server error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidBody => StatusCode::BAD_REQUEST,
            Error::MissingCredentials => StatusCode::BAD_REQUEST,
            Error::InvalidAction => StatusCode::BAD_REQUEST,
            Error::MissingName => StatusCode::BAD_REQUEST,
            Error::EmailAlreadyExists => StatusCode::CONFLICT,
            Error::InvalidEmailOrPassword => StatusCode::UNAUTHORIZED,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Reports that wrap one of our errors keep their variant, anything else is internal.
impl From<eyre::Report> for Error {
    fn from(report: eyre::Report) -> Self {
        match report.downcast::<Error>() {
            Ok(error) => error,
            Err(report) => Error::Internal(format!("{:#}", report)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(Error::InvalidBody, StatusCode::BAD_REQUEST)]
    #[case(Error::MissingCredentials, StatusCode::BAD_REQUEST)]
    #[case(Error::InvalidAction, StatusCode::BAD_REQUEST)]
    #[case(Error::MissingName, StatusCode::BAD_REQUEST)]
    #[case(Error::EmailAlreadyExists, StatusCode::CONFLICT)]
    #[case(Error::InvalidEmailOrPassword, StatusCode::UNAUTHORIZED)]
    #[case(Error::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED)]
    #[case(Error::Internal("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_code(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(expected, error.status_code());
    }

    #[test]
    fn test_report_keeps_known_error() {
        let report = eyre::Report::new(Error::EmailAlreadyExists);
        assert!(matches!(Error::from(report), Error::EmailAlreadyExists));
    }

    #[test]
    fn test_report_becomes_internal_with_context() {
        let report = eyre::eyre!("connection refused").wrap_err("Failed to look up user");
        let error = Error::from(report);
        assert_eq!(
            "Server error: Failed to look up user: connection refused",
            error.to_string()
        );
    }
}
