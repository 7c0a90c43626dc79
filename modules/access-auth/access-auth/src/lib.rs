//! Access authorization module.
//!
//! Issues single-use six-digit codes to subscribers whose plan grants access,
//! delivers them by e-mail and consumes them exactly once on verification.
//!
//! ## Architecture
//!
//! - `api/rest` - axum handlers, DTOs, HTTP error mapping
//! - `domain` - service, ports and repository traits
//! - `infra` - sea-orm storage, migrations, Resend e-mail adapter
//! - `local_client` - `AccessAuthClientV1` backed by the in-process service

#![forbid(unsafe_code)]

pub use access_auth_sdk::{
    AccessAuthClientV1, AccessAuthError, Plan, Subscriber, SubscriptionStatus, VerifiedUser,
};

pub mod config;
pub mod local_client;
pub mod module;

pub use config::AccessAuthConfig;
pub use module::AccessAuthModule;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
