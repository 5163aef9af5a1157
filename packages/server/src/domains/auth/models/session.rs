use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

/// Session - a persisted Telegram login, at most one per phone.
///
/// `token` is the provider-issued serialized credential; `created_at` drives
/// the expiry clock and is reset on every re-login.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub phone: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Insert or update the session for a phone. Re-login overwrites the
    /// token and restarts the expiry clock.
    pub async fn upsert(
        executor: impl PgExecutor<'_>,
        phone: &str,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sessions (phone, token, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (phone)
            DO UPDATE SET token = EXCLUDED.token, created_at = EXCLUDED.created_at
            "#,
        )
        .bind(phone)
        .bind(token)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Session>("SELECT phone, token, created_at FROM sessions WHERE phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// All phones with a persisted session, for the liveness sweep.
    pub async fn list_phones(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT phone FROM sessions ORDER BY phone")
            .fetch_all(pool)
            .await
    }

    /// Delete the session for a phone. Absence is not an error.
    pub async fn delete(executor: impl PgExecutor<'_>, phone: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM sessions WHERE phone = $1")
            .bind(phone)
            .execute(executor)
            .await?;
        Ok(())
    }
}
