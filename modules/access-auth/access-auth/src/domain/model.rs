use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

/// Lowest and highest code values; both render as six digits.
const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// A stored one-time code. At most one row exists per e-mail.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Fresh, unused code for `email` issued at `now`.
    pub fn issue(email: String, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        Self {
            email,
            code: generate_code(),
            expires_at: now + ttl,
            used: false,
            created_at: now,
        }
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.used && now < self.expires_at
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationCode")
            .field("email", &self.email)
            .field("code", &"******")
            .field("expires_at", &self.expires_at)
            .field("used", &self.used)
            .finish_non_exhaustive()
    }
}

/// Uniformly random code in `[100000, 999999]`, zero-padded to six characters.
pub fn generate_code() -> String {
    let n = rand::rng().random_range(CODE_MIN..=CODE_MAX);
    format!("{n:06}")
}

/// Cheap shape check so obviously bad input never reaches storage.
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}
