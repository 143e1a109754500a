//! # advisor_core
//!
//! Core domain logic for Advisor chat: identity resolution, the conversation
//! store, the completion client and prompt construction.

pub mod auth;
pub mod completion;
pub mod migrate;
pub mod models;
pub mod prompt;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
