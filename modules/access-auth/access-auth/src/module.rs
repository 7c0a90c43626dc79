use std::sync::Arc;

use access_auth_sdk::{AccessAuthClientV1, Subscriber, normalize_email};
use anyhow::Context;
use axum::Router;
use chrono::TimeDelta;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use utoipa::OpenApi;

use crate::api::rest::{openapi::AccessAuthApiDoc, routes};
use crate::config::AccessAuthConfig;
use crate::domain::ports::SystemClock;
use crate::domain::service::{Service, ServiceConfig, ServiceDeps};
use crate::infra::email::ResendMailer;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{SeaOrmCodeRepository, SeaOrmSubscriberRepository};
use crate::local_client::AccessAuthLocalClient;

/// Wired access-auth module: storage, mailer and service.
pub struct AccessAuthModule {
    service: Arc<Service>,
}

impl AccessAuthModule {
    /// Validate configuration, migrate the schema, seed subscribers and build the service.
    ///
    /// # Errors
    /// Fails on invalid configuration, migration or seeding errors.
    pub async fn init(cfg: &AccessAuthConfig, db: DatabaseConnection) -> anyhow::Result<Self> {
        cfg.validate()?;

        Migrator::up(&db, None)
            .await
            .context("access-auth migrations failed")?;

        let subscribers = Arc::new(SeaOrmSubscriberRepository::new(db.clone()));
        for seed in &cfg.seed_subscribers {
            subscribers
                .upsert(&Subscriber {
                    email: normalize_email(&seed.email),
                    plan: seed.plan,
                    status: seed.status,
                })
                .await
                .context("failed to seed subscriber")?;
        }
        if !cfg.seed_subscribers.is_empty() {
            info!(count = cfg.seed_subscribers.len(), "seeded subscribers");
        }

        let ttl_secs = i64::try_from(cfg.code_ttl_secs).context("code_ttl_secs out of range")?;
        let code_ttl = TimeDelta::try_seconds(ttl_secs).context("code_ttl_secs out of range")?;

        let service = Service::new(
            ServiceDeps {
                subscribers,
                codes: Arc::new(SeaOrmCodeRepository::new(db)),
                mailer: Arc::new(ResendMailer::from_config(&cfg.email)?),
                clock: Arc::new(SystemClock),
            },
            ServiceConfig { code_ttl },
        );

        info!(code_ttl_secs = cfg.code_ttl_secs, "access-auth module initialized");
        Ok(Self {
            service: Arc::new(service),
        })
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn AccessAuthClientV1> {
        Arc::new(AccessAuthLocalClient::new(self.service.clone()))
    }

    #[must_use]
    pub fn register_rest(&self, router: Router) -> Router {
        routes::register_routes(router, self.client())
    }

    #[must_use]
    pub fn openapi() -> utoipa::openapi::OpenApi {
        AccessAuthApiDoc::openapi()
    }
}
