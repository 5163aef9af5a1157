//! Session lifecycle controller.
//!
//! Drives the per-phone state machine
//! `NoSession -> PendingVerification -> Active -> (Expired | LoggedOut)`,
//! with a transient second-factor step inside verification. The controller
//! is the sole mutator of the sessions and users tables.

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::common::AuthError;
use crate::domains::auth::locks::PhoneLocks;
use crate::domains::auth::models::{Session, UserProfile};
use crate::domains::auth::pending::PendingLogins;
use crate::domains::auth::types::{LoginUser, VerifiedLogin};
use crate::kernel::{BaseAuthProvider, ProviderProfile, SignInOutcome};

/// Outcome of one liveness sweep, for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub checked: usize,
    pub expired: usize,
    pub failed: usize,
}

pub struct AuthService {
    pool: PgPool,
    provider: Arc<dyn BaseAuthProvider>,
    pending: PendingLogins,
    locks: PhoneLocks,
    expiry_window: Duration,
}

impl AuthService {
    pub fn new(pool: PgPool, provider: Arc<dyn BaseAuthProvider>, expiry_days: i64) -> Self {
        Self {
            pool,
            provider,
            pending: PendingLogins::new(),
            locks: PhoneLocks::new(),
            expiry_window: Duration::days(expiry_days),
        }
    }

    /// Initiate login: open a fresh provider connection, request a one-time
    /// code for `phone`, and register the connection as a pending login.
    ///
    /// On provider failure the connection is dropped and the phone stays in
    /// NoSession.
    pub async fn initiate(&self, phone: &str) -> Result<(), AuthError> {
        let _guard = self.locks.acquire(phone).await;

        let mut conn = self.provider.connect(None).await?;
        conn.request_login_code(phone).await?;
        self.pending.put(phone, conn).await;

        info!("Login code requested for {}", phone);
        Ok(())
    }

    /// Verify the one-time code (and second-factor password, when the
    /// account requires one) and persist the resulting session.
    ///
    /// The pending handle is consumed whether or not verification succeeds:
    /// the provider has already spent the code, so a failed attempt requires
    /// a fresh `initiate`.
    pub async fn verify(
        &self,
        phone: &str,
        code: &str,
        password: Option<&str>,
    ) -> Result<VerifiedLogin, AuthError> {
        let _guard = self.locks.acquire(phone).await;

        let mut conn = self
            .pending
            .take(phone)
            .await
            .ok_or(AuthError::NoPendingLogin)?;

        match conn.submit_code(phone, code).await? {
            SignInOutcome::SignedIn => {}
            SignInOutcome::SecondFactorRequired => {
                let password = password.ok_or(AuthError::PasswordRequired)?;
                conn.submit_password(password).await?;
            }
        }

        let token = conn.export_session()?;
        let profile = conn.fetch_profile().await?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        Session::upsert(&mut *tx, phone, &token, now).await?;
        UserProfile::upsert(&mut *tx, phone, &profile, now).await?;
        tx.commit().await?;

        info!("Login verified for {} (telegram id {})", phone, profile.id);
        Ok(VerifiedLogin {
            user: LoginUser {
                id: profile.id,
                username: profile.username.clone(),
                phone: profile.phone.clone().unwrap_or_else(|| phone.to_string()),
            },
            session: token,
        })
    }

    /// Fetch the live profile for a logged-in phone.
    ///
    /// Expiry is evaluated lazily here: a session older than the expiry
    /// window is purged together with its profile row before the call fails.
    /// A resume failure surfaces as `ProviderUnavailable`, never as expiry -
    /// expiry is purely time-based.
    pub async fn fetch_profile(&self, phone: &str) -> Result<ProviderProfile, AuthError> {
        let _guard = self.locks.acquire(phone).await;

        let session = Session::find_by_phone(&self.pool, phone)
            .await?
            .ok_or(AuthError::NotLoggedIn)?;

        let now = Utc::now();
        if now - session.created_at > self.expiry_window {
            let mut tx = self.pool.begin().await?;
            Session::delete(&mut *tx, phone).await?;
            UserProfile::delete(&mut *tx, phone).await?;
            tx.commit().await?;

            info!("Session expired for {}", phone);
            return Err(AuthError::SessionExpired);
        }

        let mut conn = self.provider.connect(Some(&session.token)).await?;
        conn.fetch_profile().await
    }

    /// Log out: delete the session and profile rows. Succeeds even when
    /// nothing existed.
    pub async fn logout(&self, phone: &str) -> Result<(), AuthError> {
        let _guard = self.locks.acquire(phone).await;

        let mut tx = self.pool.begin().await?;
        Session::delete(&mut *tx, phone).await?;
        UserProfile::delete(&mut *tx, phone).await?;
        tx.commit().await?;

        info!("Logged out {}", phone);
        Ok(())
    }

    /// Re-validate every persisted session, triggering expiry cleanup as a
    /// side effect. Per-phone failures are logged and counted, never halting
    /// the sweep.
    pub async fn sweep(&self) -> Result<SweepReport, AuthError> {
        let phones = Session::list_phones(&self.pool).await?;
        let mut report = SweepReport::default();

        for phone in phones {
            report.checked += 1;
            match self.fetch_profile(&phone).await {
                Ok(_) => debug!("Session alive for {}", phone),
                Err(AuthError::SessionExpired) => {
                    report.expired += 1;
                }
                Err(e) => {
                    report.failed += 1;
                    warn!("Session check failed for {}: {}", phone, e);
                }
            }
        }

        Ok(report)
    }
}
