// Common test utilities

pub mod harness;
pub mod provider;

pub use harness::*;
pub use provider::*;
