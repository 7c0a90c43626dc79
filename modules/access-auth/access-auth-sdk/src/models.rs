//! Subscription and verification models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Billing plan of a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Normal,
    Master,
}

impl Plan {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Normal => "normal",
            Self::Master => "master",
        }
    }
}

/// Billing status of a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Overdue,
}

impl SubscriptionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Overdue => "overdue",
        }
    }
}

/// Returned when a stored plan or status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Plan {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "normal" => Ok(Self::Normal),
            "master" => Ok(Self::Master),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            "overdue" => Ok(Self::Overdue),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A paying user. Written by the billing system, read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub email: String,
    pub plan: Plan,
    pub status: SubscriptionStatus,
}

impl Subscriber {
    /// Access requires an active status on a paid plan. Never persisted.
    #[must_use]
    pub fn has_access(&self) -> bool {
        self.status == SubscriptionStatus::Active && self.plan != Plan::Free
    }
}

/// Result of a successful code verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub email: String,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub has_access: bool,
}

impl From<Subscriber> for VerifiedUser {
    fn from(s: Subscriber) -> Self {
        let has_access = s.has_access();
        Self {
            email: s.email,
            plan: s.plan,
            status: s.status,
            has_access,
        }
    }
}

/// Lower-cases and trims an e-mail address.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
