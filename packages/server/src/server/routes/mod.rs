pub mod auth;
pub mod health;

pub use auth::{login_handler, logout_handler, profile_handler, root_handler, verify_code_handler};
pub use health::health_handler;
