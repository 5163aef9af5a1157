//! Scripted in-memory provider for lifecycle tests.
//!
//! Mimics the remote login protocol: codes are issued per connection,
//! accounts may require a second-factor password, exported tokens can be
//! resumed until revoked.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use relay_core::common::AuthError;
use relay_core::kernel::{
    BaseAuthProvider, BaseProviderConnection, ProviderProfile, SignInOutcome,
};

#[derive(Debug, Clone)]
pub struct FakeAccount {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub password: Option<String>,
}

impl FakeAccount {
    pub fn new(telegram_id: i64) -> Self {
        Self {
            telegram_id,
            username: Some(format!("user{}", telegram_id)),
            first_name: Some("Test".to_string()),
            password: None,
        }
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }
}

#[derive(Default)]
struct ProviderState {
    accounts: HashMap<String, FakeAccount>,
    last_codes: HashMap<String, String>,
    tokens: HashMap<String, String>,
    revoked: HashSet<String>,
    counter: u64,
}

/// Provider double implementing the gateway traits.
#[derive(Clone, Default)]
pub struct FakeProvider {
    state: Arc<Mutex<ProviderState>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_account(&self, phone: &str, account: FakeAccount) {
        self.state
            .lock()
            .unwrap()
            .accounts
            .insert(phone.to_string(), account);
    }

    /// The code most recently sent to a phone (what the user would read from
    /// their Telegram app).
    pub fn last_code(&self, phone: &str) -> String {
        self.state
            .lock()
            .unwrap()
            .last_codes
            .get(phone)
            .cloned()
            .expect("no code was sent to this phone")
    }

    /// Invalidate a token so resuming it fails, as a revoked session would.
    pub fn revoke_token(&self, token: &str) {
        self.state.lock().unwrap().revoked.insert(token.to_string());
    }
}

#[async_trait]
impl BaseAuthProvider for FakeProvider {
    async fn connect(
        &self,
        token: Option<&str>,
    ) -> Result<Box<dyn BaseProviderConnection>, AuthError> {
        match token {
            None => Ok(Box::new(FakeConnection {
                state: self.state.clone(),
                phone: None,
                expected_code: None,
                password_pending: false,
                authenticated: None,
            })),
            Some(token) => {
                let state = self.state.lock().unwrap();
                if state.revoked.contains(token) {
                    return Err(AuthError::ProviderUnavailable("token revoked".into()));
                }
                let phone = state
                    .tokens
                    .get(token)
                    .cloned()
                    .ok_or_else(|| AuthError::ProviderUnavailable("unknown token".into()))?;
                Ok(Box::new(FakeConnection {
                    state: self.state.clone(),
                    phone: Some(phone.clone()),
                    expected_code: None,
                    password_pending: false,
                    authenticated: Some(phone),
                }))
            }
        }
    }
}

struct FakeConnection {
    state: Arc<Mutex<ProviderState>>,
    phone: Option<String>,
    expected_code: Option<String>,
    password_pending: bool,
    authenticated: Option<String>,
}

#[async_trait]
impl BaseProviderConnection for FakeConnection {
    async fn request_login_code(&mut self, phone: &str) -> Result<(), AuthError> {
        let mut state = self.state.lock().unwrap();
        if !state.accounts.contains_key(phone) {
            return Err(AuthError::ProviderRejected("phone not registered".into()));
        }
        state.counter += 1;
        let code = format!("{}", 10000 + state.counter);
        state.last_codes.insert(phone.to_string(), code.clone());
        self.expected_code = Some(code);
        self.phone = Some(phone.to_string());
        Ok(())
    }

    async fn submit_code(&mut self, phone: &str, code: &str) -> Result<SignInOutcome, AuthError> {
        if self.expected_code.as_deref() != Some(code) {
            return Err(AuthError::CodeInvalid);
        }
        let account = {
            let state = self.state.lock().unwrap();
            state
                .accounts
                .get(phone)
                .cloned()
                .ok_or_else(|| AuthError::ProviderRejected("phone not registered".into()))?
        };
        if account.password.is_some() {
            self.password_pending = true;
            Ok(SignInOutcome::SecondFactorRequired)
        } else {
            self.authenticated = Some(phone.to_string());
            Ok(SignInOutcome::SignedIn)
        }
    }

    async fn submit_password(&mut self, password: &str) -> Result<(), AuthError> {
        if !self.password_pending {
            return Err(AuthError::ProviderRejected("no password expected".into()));
        }
        let phone = self.phone.clone().expect("code flow sets the phone");
        let expected = {
            let state = self.state.lock().unwrap();
            state.accounts.get(&phone).and_then(|a| a.password.clone())
        };
        if expected.as_deref() != Some(password) {
            return Err(AuthError::InvalidPassword);
        }
        self.password_pending = false;
        self.authenticated = Some(phone);
        Ok(())
    }

    fn export_session(&self) -> Result<String, AuthError> {
        let phone = self
            .authenticated
            .clone()
            .ok_or_else(|| AuthError::ProviderRejected("not signed in".into()))?;
        let mut state = self.state.lock().unwrap();
        state.counter += 1;
        let token = format!("tok-{}-{}", phone, state.counter);
        state.tokens.insert(token.clone(), phone);
        Ok(token)
    }

    async fn fetch_profile(&mut self) -> Result<ProviderProfile, AuthError> {
        let phone = self
            .authenticated
            .clone()
            .ok_or_else(|| AuthError::ProviderRejected("not signed in".into()))?;
        let state = self.state.lock().unwrap();
        let account = state
            .accounts
            .get(&phone)
            .ok_or_else(|| AuthError::ProviderUnavailable("account vanished".into()))?;
        Ok(ProviderProfile {
            id: account.telegram_id,
            username: account.username.clone(),
            first_name: account.first_name.clone(),
            last_name: None,
            phone: Some(phone.clone()),
            bio: None,
            profile_photo: None,
            last_seen: Some("UserStatusRecently".to_string()),
        })
    }
}
