//! Thin wrapper around the grammers MTProto client for the phone-login flow.
//!
//! Exposes exactly what the relay needs: connect (fresh or resumed from a
//! saved session token), request a login code, sign in with code and optional
//! second-factor password, export the session as an opaque string, and fetch
//! the signed-in user's profile.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use grammers_client::types::{LoginToken, PasswordToken};
use grammers_client::{Client, Config, InitParams, SignInError};
use grammers_session::Session;
use grammers_tl_types as tl;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("connection to Telegram failed: {0}")]
    Unavailable(String),

    #[error("Telegram rejected the request: {0}")]
    Rejected(String),

    #[error("invalid verification code")]
    InvalidCode,

    #[error("invalid second-factor password")]
    InvalidPassword,

    #[error("corrupt or unreadable session token")]
    BadToken,

    #[error("no login code was requested on this connection")]
    NoLoginRequested,
}

/// Outcome of submitting a login code.
///
/// A second-factor requirement is a protocol step, not a failure, so it is a
/// variant here rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignIn {
    Complete,
    PasswordRequired,
}

/// Profile of the signed-in user. Absent optional fields are `None`, never an
/// error.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub last_seen: Option<String>,
}

/// Factory for Telegram connections, configured with API credentials.
#[derive(Debug, Clone)]
pub struct TelegramGateway {
    api_id: i32,
    api_hash: String,
}

impl TelegramGateway {
    pub fn new(api_id: i32, api_hash: String) -> Self {
        Self { api_id, api_hash }
    }

    /// Open a connection, resuming the given session token if present or
    /// starting an anonymous context otherwise.
    pub async fn connect(&self, token: Option<&str>) -> Result<TelegramConnection, GatewayError> {
        let session = match token {
            Some(token) => {
                let bytes = BASE64.decode(token).map_err(|_| GatewayError::BadToken)?;
                Session::load(&bytes).map_err(|_| GatewayError::BadToken)?
            }
            None => Session::new(),
        };

        let client = Client::connect(Config {
            session,
            api_id: self.api_id,
            api_hash: self.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        Ok(TelegramConnection {
            client,
            login_token: None,
            password_token: None,
        })
    }
}

/// An open connection to Telegram.
///
/// Holds the in-flight login token between `request_login_code` and
/// `sign_in`, and the password token between a `SignIn::PasswordRequired`
/// outcome and `check_password`.
pub struct TelegramConnection {
    client: Client,
    login_token: Option<LoginToken>,
    password_token: Option<PasswordToken>,
}

impl TelegramConnection {
    /// Ask Telegram to send a one-time login code to `phone`.
    pub async fn request_login_code(&mut self, phone: &str) -> Result<(), GatewayError> {
        let token = self
            .client
            .request_login_code(phone)
            .await
            .map_err(|e| GatewayError::Rejected(e.to_string()))?;
        self.login_token = Some(token);
        Ok(())
    }

    /// Complete sign-in with the one-time code.
    pub async fn sign_in(&mut self, code: &str) -> Result<SignIn, GatewayError> {
        let token = self
            .login_token
            .as_ref()
            .ok_or(GatewayError::NoLoginRequested)?;

        match self.client.sign_in(token, code).await {
            Ok(_) => Ok(SignIn::Complete),
            Err(SignInError::PasswordRequired(password_token)) => {
                self.password_token = Some(password_token);
                Ok(SignIn::PasswordRequired)
            }
            Err(SignInError::InvalidCode) => Err(GatewayError::InvalidCode),
            Err(e) => Err(GatewayError::Rejected(e.to_string())),
        }
    }

    /// Complete sign-in with the account's second-factor password.
    pub async fn check_password(&mut self, password: &str) -> Result<(), GatewayError> {
        let token = self
            .password_token
            .take()
            .ok_or(GatewayError::NoLoginRequested)?;

        match self.client.check_password(token, password).await {
            Ok(_) => Ok(()),
            Err(SignInError::InvalidPassword) => Err(GatewayError::InvalidPassword),
            Err(e) => Err(GatewayError::Rejected(e.to_string())),
        }
    }

    /// Serialize the authenticated session into an opaque, reusable string.
    pub fn export_session(&self) -> String {
        BASE64.encode(self.client.session().save())
    }

    /// Fetch the signed-in user's profile, combining `get_me` with a full
    /// `users.GetFullUser` call for bio, photo, and presence.
    pub async fn fetch_profile(&mut self) -> Result<Profile, GatewayError> {
        let me = self
            .client
            .get_me()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let full = self
            .client
            .invoke(&tl::functions::users::GetFullUser {
                id: tl::enums::InputUser::UserSelf,
            })
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let tl::enums::users::UserFull::Full(full) = full;
        let tl::enums::UserFull::Full(full_user) = &full.full_user;

        let last_seen = full.users.iter().find_map(|user| match user {
            tl::enums::User::User(u) if u.id == me.id() => {
                u.status.as_ref().map(|s| format!("{:?}", s))
            }
            _ => None,
        });

        Ok(Profile {
            id: me.id(),
            username: me.username().map(str::to_string),
            first_name: Some(me.first_name().to_string()).filter(|s| !s.is_empty()),
            last_name: me.last_name().map(str::to_string),
            phone: me.phone().map(str::to_string),
            bio: full_user.about.clone(),
            profile_photo: full_user.profile_photo.as_ref().map(photo_descriptor),
            last_seen,
        })
    }
}

/// Compact textual descriptor for a profile photo object.
fn photo_descriptor(photo: &tl::enums::Photo) -> String {
    match photo {
        tl::enums::Photo::Photo(p) => format!("photo#{}", p.id),
        tl::enums::Photo::Empty(_) => "empty".to_string(),
    }
}
