//! HTTP layer for the Greenbook client SDK.
//!
//! Everything that talks to the backend lives here: the environment-
//! resolved endpoint configuration, the `ApiClient` wrapper over reqwest,
//! the standard response envelope (and the divergent review-history one),
//! and typed request/response DTOs grouped per endpoint family.

pub mod api;
pub mod client;
pub mod config;
pub mod envelope;

pub use client::ApiClient;
pub use config::{ApiConfig, Environment};
pub use envelope::ApiEnvelope;
