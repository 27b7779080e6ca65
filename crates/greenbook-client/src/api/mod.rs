//! Typed endpoint wrappers, grouped per backend endpoint family.
//!
//! Each module extends `ApiClient` with the calls one store needs and
//! defines the request/response DTOs for them, renamed to match the wire
//! contract exactly.

pub mod assets;
pub mod auth;
pub mod organization;
pub mod report;
pub mod review;
pub mod user;
pub mod workflow;
