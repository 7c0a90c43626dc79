use utoipa::OpenApi;

use super::{dto, error, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::send_verification_code,
        handlers::verify_code,
        handlers::check_subscription,
    ),
    components(schemas(
        dto::SendCodeRequest,
        dto::SendCodeResponse,
        dto::VerifyCodeRequest,
        dto::VerifyCodeResponse,
        dto::UserDto,
        dto::CheckSubscriptionRequest,
        dto::SubscriptionDto,
        error::ErrorBody,
    )),
    tags((name = "access-auth", description = "One-time-code access authorization"))
)]
pub struct AccessAuthApiDoc;
