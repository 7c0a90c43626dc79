use access_auth_sdk::{Subscriber, VerifiedUser};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to e-mail a new access code.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendCodeRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SendCodeResponse {
    pub success: bool,
    pub message: String,
}

/// Request to consume an access code.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub email: String,
    pub plan: String,
    pub has_access: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub user: UserDto,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckSubscriptionRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDto {
    pub email: String,
    pub plan: String,
    pub status: String,
    pub has_access: bool,
}

impl From<VerifiedUser> for UserDto {
    fn from(u: VerifiedUser) -> Self {
        Self {
            email: u.email,
            plan: u.plan.to_string(),
            has_access: u.has_access,
        }
    }
}

impl From<Subscriber> for SubscriptionDto {
    fn from(s: Subscriber) -> Self {
        let has_access = s.has_access();
        Self {
            email: s.email,
            plan: s.plan.to_string(),
            status: s.status.to_string(),
            has_access,
        }
    }
}
