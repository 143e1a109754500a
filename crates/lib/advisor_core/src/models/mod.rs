//! Domain models.
//!
//! These are internal domain models, distinct from the HTTP request and
//! response types in `advisor_api::models`.

pub mod auth;
pub mod chat;
