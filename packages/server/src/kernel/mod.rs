//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod scheduled_tasks;
pub mod traits;

pub use deps::TelegramProvider;
pub use traits::{BaseAuthProvider, BaseProviderConnection, ProviderProfile, SignInOutcome};
