//! Recipe gateway SDK
//!
//! This crate provides the public API for the recipe-gateway module:
//! - `RecipeGatewayClientV1` trait for callers that live in the same process
//! - Model types (`Recipe`, `Amount`, `Difficulty`, `AnalysisKind`, `ImagePayload`, `AnalysisOutcome`)
//! - Error type (`RecipeGatewayError`)

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::RecipeGatewayClientV1;
pub use errors::RecipeGatewayError;
pub use models::{Amount, AnalysisKind, AnalysisOutcome, Difficulty, ImagePayload, Recipe};
