//! In-process implementation of `RecipeGatewayClientV1`.

use std::sync::Arc;

use async_trait::async_trait;
use recipe_gateway_sdk::{
    AnalysisKind, AnalysisOutcome, ImagePayload, Recipe, RecipeGatewayClientV1, RecipeGatewayError,
};

use crate::domain::service::Service;

pub struct RecipeGatewayLocalClient {
    service: Arc<Service>,
}

impl RecipeGatewayLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RecipeGatewayClientV1 for RecipeGatewayLocalClient {
    async fn analyze_image(
        &self,
        image: ImagePayload,
        kind: AnalysisKind,
    ) -> Result<AnalysisOutcome, RecipeGatewayError> {
        self.service
            .analyze_image(&image, kind)
            .await
            .map_err(Into::into)
    }

    async fn modify_recipe(
        &self,
        recipe: &Recipe,
        instruction: &str,
    ) -> Result<Recipe, RecipeGatewayError> {
        self.service
            .modify_recipe(recipe, instruction)
            .await
            .map_err(Into::into)
    }
}
