//! Core domain layer for the Greenbook client SDK.
//!
//! This crate holds everything that does not touch the network: the shared
//! error type, domain models shaped after the backend wire contract, the
//! declarative form validator, the chapter/section outline tree, the
//! session key-value storage seam, and the toast notification channel.

pub mod criteria;
pub mod error;
pub mod notify;
pub mod organization;
pub mod outline;
pub mod report;
pub mod review;
pub mod session;
pub mod validation;
pub mod workflow;

pub use error::{GreenbookError, Result};
pub use notify::{ChannelNotifier, Notifier, NullNotifier, Toast, ToastLevel};
pub use session::{KeyValueStorage, MemoryStorage, Session};
pub use validation::{FormValidator, ValidationRule};
