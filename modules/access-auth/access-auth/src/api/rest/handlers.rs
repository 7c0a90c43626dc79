use std::sync::Arc;

use access_auth_sdk::AccessAuthClientV1;
use axum::Json;
use axum::extract::Extension;
use axum::extract::rejection::JsonRejection;
use tracing::instrument;

use super::dto::{
    CheckSubscriptionRequest, SendCodeRequest, SendCodeResponse, SubscriptionDto, UserDto,
    VerifyCodeRequest, VerifyCodeResponse,
};
use super::error::{ApiError, ErrorBody};

pub const MSG_CODE_SENT: &str = "Código enviado para seu email";

#[utoipa::path(
    post,
    path = "/access-auth/v1/send-verification-code",
    tag = "access-auth",
    request_body = SendCodeRequest,
    responses(
        (status = 200, description = "Code stored and e-mailed", body = SendCodeResponse),
        (status = 400, description = "Malformed e-mail", body = ErrorBody),
        (status = 403, description = "No active paid plan", body = ErrorBody),
        (status = 404, description = "Unknown e-mail", body = ErrorBody),
        (status = 500, description = "Delivery or storage failure", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn send_verification_code(
    Extension(client): Extension<Arc<dyn AccessAuthClientV1>>,
    payload: Result<Json<SendCodeRequest>, JsonRejection>,
) -> Result<Json<SendCodeResponse>, ApiError> {
    let Json(req) = payload?;
    client.issue_code(&req.email).await?;
    Ok(Json(SendCodeResponse {
        success: true,
        message: MSG_CODE_SENT.to_owned(),
    }))
}

#[utoipa::path(
    post,
    path = "/access-auth/v1/verify-code",
    tag = "access-auth",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Code consumed", body = VerifyCodeResponse),
        (status = 400, description = "Invalid, used or expired code", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn verify_code(
    Extension(client): Extension<Arc<dyn AccessAuthClientV1>>,
    payload: Result<Json<VerifyCodeRequest>, JsonRejection>,
) -> Result<Json<VerifyCodeResponse>, ApiError> {
    let Json(req) = payload?;
    let user = client.verify_code(&req.email, &req.code).await?;
    Ok(Json(VerifyCodeResponse {
        success: true,
        user: UserDto::from(user),
    }))
}

#[utoipa::path(
    post,
    path = "/access-auth/v1/check-subscription",
    tag = "access-auth",
    request_body = CheckSubscriptionRequest,
    responses(
        (status = 200, description = "Subscription found", body = SubscriptionDto),
        (status = 400, description = "Malformed e-mail", body = ErrorBody),
        (status = 404, description = "Unknown e-mail", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn check_subscription(
    Extension(client): Extension<Arc<dyn AccessAuthClientV1>>,
    payload: Result<Json<CheckSubscriptionRequest>, JsonRejection>,
) -> Result<Json<SubscriptionDto>, ApiError> {
    let Json(req) = payload?;
    let subscriber = client.check_subscription(&req.email).await?;
    Ok(Json(subscriber.into()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;

    use access_auth_sdk::{
        AccessAuthClientV1, AccessAuthError, Plan, Subscriber, SubscriptionStatus, VerifiedUser,
    };
    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt as _;

    use crate::api::rest::routes::{
        CHECK_SUBSCRIPTION_PATH, SEND_CODE_PATH, VERIFY_CODE_PATH, register_routes,
    };

    struct MockClient {
        issue: Result<(), AccessAuthError>,
        verify: Result<VerifiedUser, AccessAuthError>,
    }

    impl MockClient {
        fn ok() -> Self {
            Self {
                issue: Ok(()),
                verify: Ok(VerifiedUser {
                    email: "ana@x.com".to_owned(),
                    plan: Plan::Master,
                    status: SubscriptionStatus::Active,
                    has_access: true,
                }),
            }
        }

        fn failing(err: &AccessAuthError) -> Self {
            Self {
                issue: Err(err.clone()),
                verify: Err(err.clone()),
            }
        }
    }

    #[async_trait]
    impl AccessAuthClientV1 for MockClient {
        async fn issue_code(&self, _email: &str) -> Result<(), AccessAuthError> {
            self.issue.clone()
        }

        async fn verify_code(
            &self,
            _email: &str,
            _code: &str,
        ) -> Result<VerifiedUser, AccessAuthError> {
            self.verify.clone()
        }

        async fn check_subscription(&self, email: &str) -> Result<Subscriber, AccessAuthError> {
            if email == "ana@x.com" {
                Ok(Subscriber {
                    email: email.to_owned(),
                    plan: Plan::Free,
                    status: SubscriptionStatus::Active,
                })
            } else {
                Err(AccessAuthError::NotFound)
            }
        }
    }

    fn app(client: MockClient) -> Router {
        register_routes(Router::new(), Arc::new(client))
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_send_code_success_body() {
        let (status, json) =
            post_json(app(MockClient::ok()), SEND_CODE_PATH, r#"{"email":"ana@x.com"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Código enviado para seu email");
    }

    #[tokio::test]
    async fn test_send_code_error_statuses() {
        let cases = [
            (AccessAuthError::NotFound, StatusCode::NOT_FOUND),
            (AccessAuthError::NoActiveSubscription, StatusCode::FORBIDDEN),
            (AccessAuthError::DeliveryFailed, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let (status, json) = post_json(
                app(MockClient::failing(&err)),
                SEND_CODE_PATH,
                r#"{"email":"ana@x.com"}"#,
            )
            .await;
            assert_eq!(status, expected);
            assert!(json["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_verify_code_success_body() {
        let (status, json) = post_json(
            app(MockClient::ok()),
            VERIFY_CODE_PATH,
            r#"{"email":"ana@x.com","code":"123456"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["email"], "ana@x.com");
        assert_eq!(json["user"]["plan"], "master");
        assert_eq!(json["user"]["hasAccess"], true);
    }

    #[tokio::test]
    async fn test_verify_code_invalid_is_400() {
        let (status, json) = post_json(
            app(MockClient::failing(&AccessAuthError::InvalidOrExpiredCode)),
            VERIFY_CODE_PATH,
            r#"{"email":"ana@x.com","code":"000000"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Código inválido ou expirado");
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_400() {
        let (status, json) = post_json(app(MockClient::ok()), VERIFY_CODE_PATH, "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Requisição inválida");
    }

    #[tokio::test]
    async fn test_check_subscription() {
        let (status, json) = post_json(
            app(MockClient::ok()),
            CHECK_SUBSCRIPTION_PATH,
            r#"{"email":"ana@x.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["plan"], "free");
        assert_eq!(json["hasAccess"], false);

        let (status, _) = post_json(
            app(MockClient::ok()),
            CHECK_SUBSCRIPTION_PATH,
            r#"{"email":"zeca@x.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
