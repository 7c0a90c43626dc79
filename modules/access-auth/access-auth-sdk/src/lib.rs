//! Access authorization SDK
//!
//! This crate provides the public API for the access-auth module:
//! - `AccessAuthClientV1` trait for callers that live in the same process
//! - Model types (`Subscriber`, `Plan`, `SubscriptionStatus`, `VerifiedUser`)
//! - Error type (`AccessAuthError`)
//!
//! ```ignore
//! let auth: Arc<dyn AccessAuthClientV1> = module.client();
//! auth.issue_code("ana@x.com").await?;
//! let user = auth.verify_code("ana@x.com", "123456").await?;
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::AccessAuthClientV1;
pub use errors::AccessAuthError;
pub use models::{Plan, Subscriber, SubscriptionStatus, VerifiedUser, normalize_email};
