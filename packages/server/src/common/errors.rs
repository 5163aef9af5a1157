use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the session lifecycle.
///
/// Everything except `StoreUnavailable` is a client error: the caller sent a
/// request the current login state cannot satisfy. A second-factor
/// requirement is deliberately absent here; it is a protocol step modeled as
/// `SignInOutcome::SecondFactorRequired`, not a failure.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Telegram unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Telegram rejected the request: {0}")]
    ProviderRejected(String),

    #[error("Invalid verification code")]
    CodeInvalid,

    #[error("Password required for 2FA")]
    PasswordRequired,

    #[error("Invalid 2FA password")]
    InvalidPassword,

    #[error("No pending login for this phone")]
    NoPendingLogin,

    #[error("User not logged in")]
    NotLoggedIn,

    #[error("Session expired, please login again")]
    SessionExpired,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
