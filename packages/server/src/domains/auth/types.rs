//! Auth domain data types
//!
//! Simple, serializable types returned by lifecycle operations.

use serde::Serialize;

/// Identity summary returned on successful verification
#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: Option<String>,
    pub phone: String,
}

/// Result of a successful verification: who logged in, plus the session
/// token the caller can keep for reconnection
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedLogin {
    pub user: LoginUser,
    pub session: String,
}
