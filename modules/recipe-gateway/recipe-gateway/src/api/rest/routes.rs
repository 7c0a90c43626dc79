use std::sync::Arc;

use axum::routing::post;
use axum::{Extension, Router};
use recipe_gateway_sdk::RecipeGatewayClientV1;

use super::handlers;

pub const ANALYZE_IMAGE_PATH: &str = "/recipe-gateway/v1/analyze-image";
pub const MODIFY_RECIPE_PATH: &str = "/recipe-gateway/v1/modify-recipe";

pub fn register_routes(router: Router, client: Arc<dyn RecipeGatewayClientV1>) -> Router {
    router
        .route(ANALYZE_IMAGE_PATH, post(handlers::analyze_image))
        .route(MODIFY_RECIPE_PATH, post(handlers::modify_recipe))
        .layer(Extension(client))
}
