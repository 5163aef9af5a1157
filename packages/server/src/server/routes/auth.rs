//! Login flow endpoints.
//!
//! Form-encoded requests, JSON responses. Lifecycle failures serialize as
//! `{"detail": "..."}` with a 400 status (500 for store failures) via
//! `AuthError::into_response`.

use axum::{extract::Extension, Form, Json};
use serde::{Deserialize, Serialize};

use crate::common::AuthError;
use crate::domains::auth::types::LoginUser;
use crate::kernel::ProviderProfile;
use crate::server::app::AppState;

#[derive(Deserialize)]
pub struct PhoneForm {
    pub phone: String,
}

#[derive(Deserialize)]
pub struct VerifyForm {
    pub phone: String,
    pub code: String,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    pub user: LoginUser,
    pub session: String,
}

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Telegram Auth API",
    })
}

/// Initiate login: have Telegram send a one-time code to the phone.
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<PhoneForm>,
) -> Result<Json<StatusResponse>, AuthError> {
    state.auth.initiate(&form.phone).await?;
    Ok(Json(StatusResponse {
        status: "ok",
        message: "Code sent to Telegram",
    }))
}

/// Verify the one-time code (plus second-factor password when required) and
/// return the session token.
pub async fn verify_code_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<VerifyForm>,
) -> Result<Json<VerifyResponse>, AuthError> {
    let verified = state
        .auth
        .verify(&form.phone, &form.code, form.password.as_deref())
        .await?;
    Ok(Json(VerifyResponse {
        status: "ok",
        user: verified.user,
        session: verified.session,
    }))
}

/// Return the live profile for a logged-in phone.
pub async fn profile_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<PhoneForm>,
) -> Result<Json<ProviderProfile>, AuthError> {
    let profile = state.auth.fetch_profile(&form.phone).await?;
    Ok(Json(profile))
}

/// Delete the session and profile for a phone. Idempotent.
pub async fn logout_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<PhoneForm>,
) -> Result<Json<StatusResponse>, AuthError> {
    state.auth.logout(&form.phone).await?;
    Ok(Json(StatusResponse {
        status: "ok",
        message: "Logged out successfully",
    }))
}
