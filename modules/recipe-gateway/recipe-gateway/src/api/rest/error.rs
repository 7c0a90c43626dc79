use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use recipe_gateway_sdk::RecipeGatewayError;
use serde::Serialize;
use utoipa::ToSchema;

pub const MSG_RATE_LIMITED: &str = "Muitas requisições. Tente novamente em alguns segundos.";
pub const MSG_QUOTA_EXCEEDED: &str = "Créditos insuficientes. Adicione créditos no workspace.";
pub const MSG_ANALYZE_FAILED: &str = "Erro ao analisar imagem";
pub const MSG_NO_AI_RESPONSE: &str = "Nenhuma resposta da IA";
pub const MSG_UNPARSEABLE: &str = "Erro ao processar resposta da IA";
pub const MSG_MODIFY_FAILED: &str = "Erro ao modificar receita com IA";
pub const MSG_EMPTY_REPLY: &str = "Resposta vazia da IA";
pub const MSG_INVALID_FORMAT: &str = "Formato de resposta inválido";
pub const MSG_INCOMPLETE: &str = "Receita modificada incompleta";
pub const MSG_INTERNAL: &str = "Erro interno do servidor";
pub const MSG_BAD_REQUEST: &str = "Requisição inválida";

/// JSON error body. `raw` carries the unparseable model output, when there is one.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub raw: Option<String>,
    pub retry_after_secs: Option<u64>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            raw: None,
            retry_after_secs: None,
        }
    }

    fn internal(e: &RecipeGatewayError) -> Self {
        tracing::error!(error = %e, "Internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
    }
}

/// Status and message for a failed image analysis.
pub fn analyze_error_to_api(e: &RecipeGatewayError) -> ApiError {
    match e {
        RecipeGatewayError::InvalidInput { message } => {
            ApiError::new(StatusCode::BAD_REQUEST, message.clone())
        }
        RecipeGatewayError::RateLimited { retry_after_secs } => ApiError {
            retry_after_secs: *retry_after_secs,
            ..ApiError::new(StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED)
        },
        RecipeGatewayError::QuotaExceeded => {
            ApiError::new(StatusCode::PAYMENT_REQUIRED, MSG_QUOTA_EXCEEDED)
        }
        RecipeGatewayError::Upstream { .. } => {
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_ANALYZE_FAILED)
        }
        RecipeGatewayError::EmptyResponse => {
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_NO_AI_RESPONSE)
        }
        RecipeGatewayError::MalformedResponse { raw } => ApiError {
            raw: Some(raw.clone()),
            ..ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_UNPARSEABLE)
        },
        RecipeGatewayError::IncompleteRecipe { .. } | RecipeGatewayError::Internal => {
            ApiError::internal(e)
        }
    }
}

/// Status and message for a failed recipe modification. Every failure is a 500.
pub fn modify_error_to_api(e: &RecipeGatewayError) -> ApiError {
    let message = match e {
        RecipeGatewayError::InvalidInput { message } => message.as_str(),
        RecipeGatewayError::RateLimited { .. }
        | RecipeGatewayError::QuotaExceeded
        | RecipeGatewayError::Upstream { .. } => MSG_MODIFY_FAILED,
        RecipeGatewayError::EmptyResponse => MSG_EMPTY_REPLY,
        RecipeGatewayError::MalformedResponse { .. } => MSG_INVALID_FORMAT,
        RecipeGatewayError::IncompleteRecipe { .. } => MSG_INCOMPLETE,
        RecipeGatewayError::Internal => return ApiError::internal(e),
    };
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        Self::new(StatusCode::BAD_REQUEST, MSG_BAD_REQUEST)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (
            self.status,
            Json(ErrorBody {
                error: self.message,
                raw: self.raw,
            }),
        )
            .into_response();
        if let Some(secs) = self.retry_after_secs {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}
