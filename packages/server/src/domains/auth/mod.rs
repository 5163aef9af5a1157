//! Auth domain - the session lifecycle.
//!
//! `AuthService` orchestrates login initiation, code/password verification,
//! profile fetch with lazy expiry, logout, and the periodic liveness sweep.

pub mod locks;
pub mod models;
pub mod pending;
pub mod service;
pub mod types;

pub use service::{AuthService, SweepReport};
pub use types::{LoginUser, VerifiedLogin};
