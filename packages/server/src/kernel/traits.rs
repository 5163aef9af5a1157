// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The lifecycle controller talks to Telegram exclusively through them, so
// tests can substitute a scripted provider.
//
// Naming convention: Base* for trait names (e.g., BaseAuthProvider)

use async_trait::async_trait;
use serde::Serialize;

use crate::common::AuthError;

/// Outcome of submitting a one-time login code.
///
/// A second-factor requirement is a named transitional outcome of the
/// protocol, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    SignedIn,
    SecondFactorRequired,
}

/// Live profile of the signed-in user as reported by the provider.
///
/// Absent optional fields are `None`, never an error.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderProfile {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub last_seen: Option<String>,
}

/// Opens connections to the remote authentication provider.
#[async_trait]
pub trait BaseAuthProvider: Send + Sync {
    /// Establish a connection. With `token`, resume that session context;
    /// without, start an anonymous one awaiting the code flow.
    async fn connect(
        &self,
        token: Option<&str>,
    ) -> Result<Box<dyn BaseProviderConnection>, AuthError>;
}

/// A single open connection to the provider, progressing through the login
/// protocol or resumed from a saved session.
#[async_trait]
pub trait BaseProviderConnection: Send + Sync {
    /// Ask the provider to send a one-time code to `phone`.
    async fn request_login_code(&mut self, phone: &str) -> Result<(), AuthError>;

    /// Complete sign-in with the one-time code.
    async fn submit_code(&mut self, phone: &str, code: &str) -> Result<SignInOutcome, AuthError>;

    /// Complete sign-in with the account's second-factor password.
    async fn submit_password(&mut self, password: &str) -> Result<(), AuthError>;

    /// Serialize the authenticated credential into an opaque, reusable string.
    fn export_session(&self) -> Result<String, AuthError>;

    /// Fetch the signed-in user's profile.
    async fn fetch_profile(&mut self) -> Result<ProviderProfile, AuthError>;
}
