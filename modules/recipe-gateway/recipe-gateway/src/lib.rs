//! Recipe gateway module.
//!
//! Shapes prompts for a hosted chat-completion model, pulls a JSON payload out of
//! its free-text reply, validates it against the recipe contract and folds upstream
//! failures into a small error taxonomy.

#![forbid(unsafe_code)]

pub use recipe_gateway_sdk::{
    AnalysisKind, AnalysisOutcome, Difficulty, ImagePayload, Recipe, RecipeGatewayClientV1,
    RecipeGatewayError,
};

pub mod config;
pub mod local_client;
pub mod module;

pub use config::RecipeGatewayConfig;
pub use module::RecipeGatewayModule;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
