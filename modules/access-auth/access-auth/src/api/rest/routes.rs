use std::sync::Arc;

use access_auth_sdk::AccessAuthClientV1;
use axum::routing::post;
use axum::{Extension, Router};

use super::handlers;

pub const SEND_CODE_PATH: &str = "/access-auth/v1/send-verification-code";
pub const VERIFY_CODE_PATH: &str = "/access-auth/v1/verify-code";
pub const CHECK_SUBSCRIPTION_PATH: &str = "/access-auth/v1/check-subscription";

pub fn register_routes(router: Router, client: Arc<dyn AccessAuthClientV1>) -> Router {
    router
        .route(SEND_CODE_PATH, post(handlers::send_verification_code))
        .route(VERIFY_CODE_PATH, post(handlers::verify_code))
        .route(CHECK_SUBSCRIPTION_PATH, post(handlers::check_subscription))
        .layer(Extension(client))
}
