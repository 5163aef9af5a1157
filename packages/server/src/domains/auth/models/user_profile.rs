use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::kernel::ProviderProfile;

/// UserProfile - snapshot of the Telegram profile taken at verification time.
///
/// Exists iff the same phone has a session; both rows are written and deleted
/// in the same transaction by the lifecycle controller.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfile {
    pub phone: String,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub last_seen: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Insert or update the profile snapshot for a phone.
    pub async fn upsert(
        executor: impl PgExecutor<'_>,
        phone: &str,
        profile: &ProviderProfile,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO users (phone, telegram_id, username, first_name, last_name,
                               bio, profile_photo, last_seen, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (phone) DO UPDATE SET
                telegram_id = EXCLUDED.telegram_id,
                username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                bio = EXCLUDED.bio,
                profile_photo = EXCLUDED.profile_photo,
                last_seen = EXCLUDED.last_seen,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(phone)
        .bind(profile.id)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.bio)
        .bind(&profile.profile_photo)
        .bind(&profile.last_seen)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserProfile>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete the profile snapshot for a phone. Absence is not an error.
    pub async fn delete(executor: impl PgExecutor<'_>, phone: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM users WHERE phone = $1")
            .bind(phone)
            .execute(executor)
            .await?;
        Ok(())
    }
}
