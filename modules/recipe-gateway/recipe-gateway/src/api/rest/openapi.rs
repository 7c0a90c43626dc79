use utoipa::OpenApi;

use super::{dto, error, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::analyze_image, handlers::modify_recipe),
    components(schemas(
        dto::AnalyzeImageRequest,
        dto::AnalyzeImageResponse,
        dto::AnalysisDto,
        dto::AnalysisKindDto,
        dto::ModifyRecipeRequest,
        dto::ModifyRecipeResponse,
        dto::RecipeDto,
        error::ErrorBody,
    )),
    tags((name = "recipe-gateway", description = "Image recognition and recipe rewriting"))
)]
pub struct RecipeGatewayApiDoc;
