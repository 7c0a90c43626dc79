#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use access_auth_sdk::{Plan, Subscriber, SubscriptionStatus};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeDelta, Utc};
    use tracing_test::traced_test;

    use crate::domain::error::DomainError;
    use crate::domain::model::VerificationCode;
    use crate::domain::ports::{Clock, CodeMailer};
    use crate::domain::repo::{SubscriberRepository, VerificationCodeRepository};
    use crate::domain::service::{Service, ServiceConfig, ServiceDeps};

    #[derive(Default)]
    struct InMemorySubscribers {
        rows: Mutex<HashMap<String, Subscriber>>,
    }

    impl InMemorySubscribers {
        fn with(subscribers: &[(&str, Plan, SubscriptionStatus)]) -> Self {
            let rows = subscribers
                .iter()
                .map(|(email, plan, status)| {
                    (
                        (*email).to_owned(),
                        Subscriber {
                            email: (*email).to_owned(),
                            plan: *plan,
                            status: *status,
                        },
                    )
                })
                .collect();
            Self {
                rows: Mutex::new(rows),
            }
        }
    }

    #[async_trait]
    impl SubscriberRepository for InMemorySubscribers {
        async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Subscriber>> {
            Ok(self.rows.lock().unwrap().get(email).cloned())
        }
    }

    #[derive(Default)]
    struct InMemoryCodes {
        rows: Mutex<HashMap<String, VerificationCode>>,
    }

    impl InMemoryCodes {
        fn get(&self, email: &str) -> Option<VerificationCode> {
            self.rows.lock().unwrap().get(email).cloned()
        }
    }

    #[async_trait]
    impl VerificationCodeRepository for InMemoryCodes {
        async fn upsert(&self, code: &VerificationCode) -> anyhow::Result<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(code.email.clone(), code.clone());
            Ok(())
        }

        async fn consume(
            &self,
            email: &str,
            code: &str,
            now: DateTime<Utc>,
        ) -> anyhow::Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(email) {
                Some(row) if row.code == code && row.is_live(now) => {
                    row.used = true;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String, TimeDelta)>>,
        fail: bool,
    }

    #[async_trait]
    impl CodeMailer for RecordingMailer {
        async fn send_code(&self, to: &str, code: &str, ttl: TimeDelta) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("provider rejected message");
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_owned(), code.to_owned(), ttl));
            Ok(())
        }
    }

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn at(rfc3339: &str) -> Self {
            Self(Mutex::new(
                DateTime::parse_from_rfc3339(rfc3339)
                    .unwrap()
                    .with_timezone(&Utc),
            ))
        }

        fn advance(&self, by: TimeDelta) {
            let mut now = self.0.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    struct Fixture {
        service: Service,
        codes: Arc<InMemoryCodes>,
        mailer: Arc<RecordingMailer>,
        clock: Arc<ManualClock>,
    }

    fn fixture_with(subscribers: &[(&str, Plan, SubscriptionStatus)], mailer_fails: bool) -> Fixture {
        let codes = Arc::new(InMemoryCodes::default());
        let mailer = Arc::new(RecordingMailer {
            fail: mailer_fails,
            ..RecordingMailer::default()
        });
        let clock = Arc::new(ManualClock::at("2026-03-01T09:00:00Z"));
        let service = Service::new(
            ServiceDeps {
                subscribers: Arc::new(InMemorySubscribers::with(subscribers)),
                codes: codes.clone(),
                mailer: mailer.clone(),
                clock: clock.clone(),
            },
            ServiceConfig::default(),
        );
        Fixture {
            service,
            codes,
            mailer,
            clock,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(
            &[
                ("ana@x.com", Plan::Master, SubscriptionStatus::Active),
                ("bia@x.com", Plan::Free, SubscriptionStatus::Active),
                ("caio@x.com", Plan::Normal, SubscriptionStatus::Overdue),
                ("duda@x.com", Plan::Normal, SubscriptionStatus::Cancelled),
            ],
            false,
        )
    }

    #[tokio::test]
    async fn test_issue_code_unknown_email_writes_nothing() {
        let f = fixture();

        let err = f.service.issue_code("nobody@x.com").await.unwrap_err();

        assert!(matches!(err, DomainError::SubscriberNotFound));
        assert!(f.codes.get("nobody@x.com").is_none());
        assert!(f.mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_issue_code_rejects_subscribers_without_access() {
        let f = fixture();

        for email in ["bia@x.com", "caio@x.com", "duda@x.com"] {
            let err = f.service.issue_code(email).await.unwrap_err();
            assert!(
                matches!(err, DomainError::NoActiveSubscription),
                "{email} should be rejected"
            );
            assert!(f.codes.get(email).is_none());
        }
    }

    #[tokio::test]
    async fn test_issue_code_stores_six_digit_code_expiring_in_ten_minutes() {
        let f = fixture();

        f.service.issue_code("ana@x.com").await.unwrap();

        let row = f.codes.get("ana@x.com").unwrap();
        assert_eq!(row.code.len(), 6);
        assert!(row.code.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(row.created_at, f.clock.now());
        assert_eq!(row.expires_at, f.clock.now() + TimeDelta::minutes(10));
        assert!(!row.used);

        let sent = f.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ana@x.com");
        assert_eq!(sent[0].1, row.code);
        assert_eq!(sent[0].2, TimeDelta::minutes(10));
    }

    #[tokio::test]
    async fn test_issue_code_rejects_address_without_at() {
        let f = fixture();

        let err = f.service.issue_code("ana.x.com").await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(m) if m == "Email inválido"));
    }

    #[tokio::test]
    async fn test_normalized_email_round_trip_succeeds_once() {
        let f = fixture();

        f.service.issue_code("Ana@X.com ").await.unwrap();
        let code = f.codes.get("ana@x.com").unwrap().code;

        let user = f.service.verify_code("ana@x.com", &code).await.unwrap();
        assert!(user.has_access);
        assert_eq!(user.email, "ana@x.com");
        assert_eq!(user.plan, Plan::Master);

        let err = f.service.verify_code("ana@x.com", &code).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidOrExpiredCode));
    }

    #[tokio::test]
    async fn test_verify_code_wrong_code_is_rejected() {
        let f = fixture();
        f.service.issue_code("ana@x.com").await.unwrap();
        let code = f.codes.get("ana@x.com").unwrap().code;
        let wrong = if code == "123456" { "654321" } else { "123456" };

        let err = f.service.verify_code("ana@x.com", wrong).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidOrExpiredCode));
        assert!(!f.codes.get("ana@x.com").unwrap().used);
    }

    #[tokio::test]
    async fn test_verify_code_after_expiry_fails_and_leaves_row_unused() {
        let f = fixture();
        f.service.issue_code("ana@x.com").await.unwrap();
        let code = f.codes.get("ana@x.com").unwrap().code;

        f.clock.advance(TimeDelta::minutes(10) + TimeDelta::seconds(1));
        let err = f.service.verify_code("ana@x.com", &code).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidOrExpiredCode));
        assert!(!f.codes.get("ana@x.com").unwrap().used);
    }

    #[tokio::test]
    async fn test_verify_code_just_before_expiry_succeeds() {
        let f = fixture();
        f.service.issue_code("ana@x.com").await.unwrap();
        let code = f.codes.get("ana@x.com").unwrap().code;

        f.clock.advance(TimeDelta::minutes(10) - TimeDelta::seconds(1));

        assert!(f.service.verify_code("ana@x.com", &code).await.is_ok());
    }

    #[tokio::test]
    async fn test_reissue_invalidates_previous_code() {
        let f = fixture();
        f.service.issue_code("ana@x.com").await.unwrap();
        let first = f.codes.get("ana@x.com").unwrap().code;

        let mut second = first.clone();
        while second == first {
            f.service.issue_code("ana@x.com").await.unwrap();
            second = f.codes.get("ana@x.com").unwrap().code;
        }

        let err = f.service.verify_code("ana@x.com", &first).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidOrExpiredCode));
        assert!(f.service.verify_code("ana@x.com", &second).await.is_ok());
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_stored_code() {
        let f = fixture_with(
            &[("ana@x.com", Plan::Normal, SubscriptionStatus::Active)],
            true,
        );

        let err = f.service.issue_code("ana@x.com").await.unwrap_err();

        assert!(matches!(err, DomainError::DeliveryFailed(_)));
        let row = f.codes.get("ana@x.com").unwrap();
        assert!(!row.used);
    }

    #[tokio::test]
    async fn test_verify_code_requires_both_fields() {
        let f = fixture();

        let err = f.service.verify_code(" ", "123456").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = f.service.verify_code("ana@x.com", "").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_verify_code_reports_current_subscription() {
        let f = fixture();
        f.service.issue_code("ana@x.com").await.unwrap();
        let code = f.codes.get("ana@x.com").unwrap().code;

        let user = f.service.verify_code(" ANA@x.com", &code).await.unwrap();

        assert_eq!(user.status, SubscriptionStatus::Active);
        assert!(user.has_access);
    }

    #[tokio::test]
    async fn test_check_subscription() {
        let f = fixture();

        let sub = f.service.check_subscription("Bia@x.com").await.unwrap();
        assert_eq!(sub.plan, Plan::Free);
        assert!(!sub.has_access());

        let err = f.service.check_subscription("zeca@x.com").await.unwrap_err();
        assert!(matches!(err, DomainError::SubscriberNotFound));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_logs_mask_email_and_omit_code() {
        let f = fixture();

        f.service.issue_code("ana@x.com").await.unwrap();
        let code = f.codes.get("ana@x.com").unwrap().code;

        assert!(logs_contain("verification code issued"));
        assert!(logs_contain("a***@x.com"));
        assert!(!logs_contain("ana@x.com"));
        assert!(!logs_contain(&format!("code={code}")));
    }
}
