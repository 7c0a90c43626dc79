//! `RecipeGatewayClientV1` trait definition.

use async_trait::async_trait;

use crate::errors::RecipeGatewayError;
use crate::models::{AnalysisKind, AnalysisOutcome, ImagePayload, Recipe};

/// Public API trait for the recipe-gateway module (Version 1).
///
/// Each call performs at most one upstream request and never retries.
#[async_trait]
pub trait RecipeGatewayClientV1: Send + Sync {
    /// Recognise a fridge's contents or a finished dish and return a recipe for it.
    async fn analyze_image(
        &self,
        image: ImagePayload,
        kind: AnalysisKind,
    ) -> Result<AnalysisOutcome, RecipeGatewayError>;

    /// Ask the model for a new version of `recipe` with `instruction` applied.
    async fn modify_recipe(
        &self,
        recipe: &Recipe,
        instruction: &str,
    ) -> Result<Recipe, RecipeGatewayError>;
}
