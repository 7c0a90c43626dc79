use access_auth_sdk::Subscriber;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::model::VerificationCode;
use crate::domain::repo::{SubscriberRepository, VerificationCodeRepository};

use super::entity::{subscriber, verification_code};

pub struct SeaOrmSubscriberRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubscriberRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert or overwrite a subscriber. Used to seed local databases.
    ///
    /// # Errors
    /// Returns the database error.
    pub async fn upsert(&self, s: &Subscriber) -> anyhow::Result<()> {
        let am = subscriber::ActiveModel {
            email: ActiveValue::Set(s.email.clone()),
            plan: ActiveValue::Set(s.plan.as_str().to_owned()),
            status: ActiveValue::Set(s.status.as_str().to_owned()),
            updated_at: ActiveValue::Set(Utc::now()),
        };

        subscriber::Entity::insert(am)
            .on_conflict(
                OnConflict::column(subscriber::Column::Email)
                    .update_columns([
                        subscriber::Column::Plan,
                        subscriber::Column::Status,
                        subscriber::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SubscriberRepository for SeaOrmSubscriberRepository {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Subscriber>> {
        subscriber::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await?
            .map(Subscriber::try_from)
            .transpose()
    }
}

pub struct SeaOrmCodeRepository {
    db: DatabaseConnection,
}

impl SeaOrmCodeRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Current row for an address, used or not.
    ///
    /// # Errors
    /// Returns the database error.
    pub async fn find(&self, email: &str) -> anyhow::Result<Option<VerificationCode>> {
        Ok(verification_code::Entity::find_by_id(email.to_owned())
            .one(&self.db)
            .await?
            .map(Into::into))
    }
}

#[async_trait]
impl VerificationCodeRepository for SeaOrmCodeRepository {
    async fn upsert(&self, code: &VerificationCode) -> anyhow::Result<()> {
        verification_code::Entity::insert(verification_code::ActiveModel::from(code))
            .on_conflict(
                OnConflict::column(verification_code::Column::Email)
                    .update_columns([
                        verification_code::Column::Code,
                        verification_code::Column::ExpiresAt,
                        verification_code::Column::Used,
                        verification_code::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn consume(&self, email: &str, code: &str, now: DateTime<Utc>) -> anyhow::Result<bool> {
        let res = verification_code::Entity::update_many()
            .col_expr(verification_code::Column::Used, Expr::value(true))
            .filter(verification_code::Column::Email.eq(email))
            .filter(verification_code::Column::Code.eq(code))
            .filter(verification_code::Column::Used.eq(false))
            .filter(verification_code::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected == 1)
    }
}
