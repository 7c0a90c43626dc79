use access_auth_sdk::AccessAuthError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

pub const MSG_NOT_FOUND: &str = "Email não encontrado. Por favor, adquira um plano.";
pub const MSG_NO_ACTIVE_PLAN: &str = "Você não possui um plano ativo.";
pub const MSG_INVALID_CODE: &str = "Código inválido ou expirado";
pub const MSG_DELIVERY_FAILED: &str = "Erro ao enviar código por email. Tente novamente.";
pub const MSG_INTERNAL: &str = "Erro interno do servidor";
pub const MSG_BAD_REQUEST: &str = "Requisição inválida";

/// JSON error body shared by all endpoints of this module.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Map an SDK error to status and user-facing message.
pub fn auth_error_to_api(e: &AccessAuthError) -> ApiError {
    match e {
        AccessAuthError::NotFound => ApiError::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND),
        AccessAuthError::NoActiveSubscription => {
            ApiError::new(StatusCode::FORBIDDEN, MSG_NO_ACTIVE_PLAN)
        }
        AccessAuthError::InvalidOrExpiredCode => {
            ApiError::new(StatusCode::BAD_REQUEST, MSG_INVALID_CODE)
        }
        AccessAuthError::InvalidInput { message } => {
            ApiError::new(StatusCode::BAD_REQUEST, message.clone())
        }
        AccessAuthError::DeliveryFailed => {
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_DELIVERY_FAILED)
        }
        AccessAuthError::Internal => {
            tracing::error!(error = ?e, "Internal error");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
        }
    }
}

impl From<AccessAuthError> for ApiError {
    fn from(e: AccessAuthError) -> Self {
        auth_error_to_api(&e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        Self::new(StatusCode::BAD_REQUEST, MSG_BAD_REQUEST)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
