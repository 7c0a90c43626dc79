use std::sync::Arc;

use axum::Router;
use recipe_gateway_sdk::RecipeGatewayClientV1;
use tracing::info;
use utoipa::OpenApi;

use crate::api::rest::{openapi::RecipeGatewayApiDoc, routes};
use crate::config::RecipeGatewayConfig;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::upstream::OpenAiChatClient;
use crate::local_client::RecipeGatewayLocalClient;

/// Wired recipe-gateway module.
pub struct RecipeGatewayModule {
    service: Arc<Service>,
}

impl RecipeGatewayModule {
    /// # Errors
    /// Fails on invalid configuration or when the HTTP client cannot be built.
    pub fn init(cfg: &RecipeGatewayConfig) -> anyhow::Result<Self> {
        cfg.validate()?;

        let chat = OpenAiChatClient::from_config(cfg)?;
        let service = Service::new(
            Arc::new(chat),
            ServiceConfig {
                analyze_max_tokens: cfg.analyze_max_tokens,
                modify_temperature: cfg.modify_temperature,
            },
        );

        info!(model = %cfg.model, "recipe-gateway module initialized");
        Ok(Self {
            service: Arc::new(service),
        })
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn RecipeGatewayClientV1> {
        Arc::new(RecipeGatewayLocalClient::new(self.service.clone()))
    }

    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        routes::register_routes(router, self.client())
    }

    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        RecipeGatewayApiDoc::openapi()
    }
}
