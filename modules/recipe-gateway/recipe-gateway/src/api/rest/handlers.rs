use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::extract::rejection::JsonRejection;
use recipe_gateway_sdk::{ImagePayload, RecipeGatewayClientV1};
use tracing::instrument;

use super::dto::{AnalyzeImageRequest, AnalyzeImageResponse, ModifyRecipeRequest, ModifyRecipeResponse};
use super::error::{ApiError, ErrorBody, analyze_error_to_api, modify_error_to_api};

#[utoipa::path(
    post,
    path = "/recipe-gateway/v1/analyze-image",
    tag = "recipe-gateway",
    request_body = AnalyzeImageRequest,
    responses(
        (status = 200, description = "Image recognised", body = AnalyzeImageResponse),
        (status = 400, description = "Missing image or malformed body", body = ErrorBody),
        (status = 402, description = "Upstream credits exhausted", body = ErrorBody),
        (status = 429, description = "Upstream rate limit", body = ErrorBody),
        (status = 500, description = "Upstream failure or unusable model output", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn analyze_image(
    Extension(client): Extension<Arc<dyn RecipeGatewayClientV1>>,
    payload: Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Result<Json<AnalyzeImageResponse>, ApiError> {
    let Json(req) = payload?;
    let outcome = client
        .analyze_image(ImagePayload::new(req.image), req.kind.into())
        .await
        .map_err(|e| analyze_error_to_api(&e))?;
    Ok(Json(AnalyzeImageResponse {
        success: true,
        data: outcome.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/recipe-gateway/v1/modify-recipe",
    tag = "recipe-gateway",
    request_body = ModifyRecipeRequest,
    responses(
        (status = 200, description = "Recipe rewritten", body = ModifyRecipeResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 500, description = "Blank instruction, upstream failure or unusable model output", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn modify_recipe(
    Extension(client): Extension<Arc<dyn RecipeGatewayClientV1>>,
    payload: Result<Json<ModifyRecipeRequest>, JsonRejection>,
) -> Result<Json<ModifyRecipeResponse>, ApiError> {
    let Json(req) = payload?;
    let recipe = client
        .modify_recipe(&req.recipe.into(), &req.modification)
        .await
        .map_err(|e| modify_error_to_api(&e))?;
    Ok(Json(ModifyRecipeResponse {
        recipe: recipe.into(),
    }))
}
