// Telegram Auth Relay - core library
//
// Bridges HTTP clients to Telegram's phone-login flow: request a login code,
// verify it (with optional second-factor password), persist the session token
// and profile snapshot, and expose session-bound profile/logout operations
// with time-based expiry.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
