//! Provider adapter wiring the telegram gateway crate to the DI traits.
//!
//! `TelegramProvider` wraps `telegram::TelegramGateway` and maps its typed
//! `GatewayError` into the service error taxonomy, so nothing above this
//! layer knows about grammers.

use async_trait::async_trait;
use telegram::{GatewayError, TelegramConnection, TelegramGateway};

use crate::common::AuthError;
use crate::kernel::traits::{
    BaseAuthProvider, BaseProviderConnection, ProviderProfile, SignInOutcome,
};

/// Wrapper around TelegramGateway that implements BaseAuthProvider
pub struct TelegramProvider {
    gateway: TelegramGateway,
}

impl TelegramProvider {
    pub fn new(api_id: i32, api_hash: String) -> Self {
        Self {
            gateway: TelegramGateway::new(api_id, api_hash),
        }
    }
}

#[async_trait]
impl BaseAuthProvider for TelegramProvider {
    async fn connect(
        &self,
        token: Option<&str>,
    ) -> Result<Box<dyn BaseProviderConnection>, AuthError> {
        let conn = self.gateway.connect(token).await.map_err(map_error)?;
        Ok(Box::new(TelegramProviderConnection { conn }))
    }
}

struct TelegramProviderConnection {
    conn: TelegramConnection,
}

#[async_trait]
impl BaseProviderConnection for TelegramProviderConnection {
    async fn request_login_code(&mut self, phone: &str) -> Result<(), AuthError> {
        self.conn.request_login_code(phone).await.map_err(map_error)
    }

    async fn submit_code(&mut self, _phone: &str, code: &str) -> Result<SignInOutcome, AuthError> {
        match self.conn.sign_in(code).await.map_err(map_error)? {
            telegram::SignIn::Complete => Ok(SignInOutcome::SignedIn),
            telegram::SignIn::PasswordRequired => Ok(SignInOutcome::SecondFactorRequired),
        }
    }

    async fn submit_password(&mut self, password: &str) -> Result<(), AuthError> {
        self.conn.check_password(password).await.map_err(map_error)
    }

    fn export_session(&self) -> Result<String, AuthError> {
        Ok(self.conn.export_session())
    }

    async fn fetch_profile(&mut self) -> Result<ProviderProfile, AuthError> {
        let profile = self.conn.fetch_profile().await.map_err(map_error)?;
        Ok(ProviderProfile {
            id: profile.id,
            username: profile.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            bio: profile.bio,
            profile_photo: profile.profile_photo,
            last_seen: profile.last_seen,
        })
    }
}

fn map_error(err: GatewayError) -> AuthError {
    match err {
        GatewayError::Unavailable(msg) => AuthError::ProviderUnavailable(msg),
        GatewayError::Rejected(msg) => AuthError::ProviderRejected(msg),
        GatewayError::InvalidCode => AuthError::CodeInvalid,
        GatewayError::InvalidPassword => AuthError::InvalidPassword,
        // A token we cannot even deserialize behaves like a revoked one.
        GatewayError::BadToken => {
            AuthError::ProviderUnavailable("corrupt or unreadable session token".to_string())
        }
        GatewayError::NoLoginRequested => AuthError::NoPendingLogin,
    }
}
