use serde::Deserialize;
use uuid::Uuid;

pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Payment provider (Polka) webhook payload.
#[derive(Debug, Deserialize)]
pub struct PolkaWebhookRequest {
    pub event: String,
    pub data: PolkaWebhookData,
}

#[derive(Debug, Deserialize)]
pub struct PolkaWebhookData {
    pub user_id: Uuid,
}
