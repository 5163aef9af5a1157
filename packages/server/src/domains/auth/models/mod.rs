// Persistence models - ALL SQL queries live here

pub mod session;
pub mod user_profile;

pub use session::Session;
pub use user_profile::UserProfile;
