use access_auth_sdk::Subscriber;
use anyhow::Context;
use sea_orm::ActiveValue;

use crate::domain::model::VerificationCode;

use super::entity::{subscriber, verification_code};

impl TryFrom<subscriber::Model> for Subscriber {
    type Error = anyhow::Error;

    fn try_from(m: subscriber::Model) -> Result<Self, Self::Error> {
        let plan = m
            .plan
            .parse()
            .with_context(|| format!("subscriber row has unknown plan '{}'", m.plan))?;
        let status = m
            .status
            .parse()
            .with_context(|| format!("subscriber row has unknown status '{}'", m.status))?;
        Ok(Self {
            email: m.email,
            plan,
            status,
        })
    }
}

impl From<verification_code::Model> for VerificationCode {
    fn from(m: verification_code::Model) -> Self {
        Self {
            email: m.email,
            code: m.code,
            expires_at: m.expires_at,
            used: m.used,
            created_at: m.created_at,
        }
    }
}

impl From<&VerificationCode> for verification_code::ActiveModel {
    fn from(c: &VerificationCode) -> Self {
        Self {
            email: ActiveValue::Set(c.email.clone()),
            code: ActiveValue::Set(c.code.clone()),
            expires_at: ActiveValue::Set(c.expires_at),
            used: ActiveValue::Set(c.used),
            created_at: ActiveValue::Set(c.created_at),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use access_auth_sdk::{Plan, SubscriptionStatus};
    use chrono::Utc;

    use super::*;

    fn row(plan: &str, status: &str) -> subscriber::Model {
        subscriber::Model {
            email: "ana@x.com".to_owned(),
            plan: plan.to_owned(),
            status: status.to_owned(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn subscriber_row_maps_to_model() {
        let s = Subscriber::try_from(row("normal", "active")).unwrap();
        assert_eq!(s.plan, Plan::Normal);
        assert_eq!(s.status, SubscriptionStatus::Active);
    }

    #[test]
    fn unknown_plan_is_an_error() {
        let err = Subscriber::try_from(row("gold", "active")).unwrap_err();
        assert!(err.to_string().contains("gold"));
    }

    #[test]
    fn unknown_status_is_an_error() {
        assert!(Subscriber::try_from(row("free", "paused")).is_err());
    }
}
