use serde::Deserialize;
use serde_json::Value;

const VERIFICATION_STATUS_PREFIX: &str = "VERIFICATION_STATUS_";

/// The fields we look at in a Plaid webhook body. Everything else is ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct WebhookPayload {
    pub webhook_type: String,
    pub webhook_code: String,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub new_webhook_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    Item {
        item_id: Option<String>,
        event: ItemEvent,
    },
    IncomeVerification {
        /// Plaid's id for the user, see [crate::db::UserRecord::webhook_user_id]
        user_id: Option<String>,
        status: IncomeVerificationStatus,
    },
    Unhandled {
        webhook_type: String,
        webhook_code: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Error(Option<Value>),
    NewAccountsAvailable,
    PendingExpiration,
    UserPermissionRevoked,
    WebhookUpdateAcknowledged { new_webhook_url: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeVerificationStatus {
    ProcessingComplete,
    ProcessingFailed,
    PendingApproval,
}

impl IncomeVerificationStatus {
    /// Accepts both `PROCESSING_COMPLETE` and `VERIFICATION_STATUS_PROCESSING_COMPLETE`
    pub fn parse(status: &str) -> Option<Self> {
        let status = status
            .strip_prefix(VERIFICATION_STATUS_PREFIX)
            .unwrap_or(status);
        match status {
            "PROCESSING_COMPLETE" => Some(Self::ProcessingComplete),
            "PROCESSING_FAILED" => Some(Self::ProcessingFailed),
            "PENDING_APPROVAL" => Some(Self::PendingApproval),
            _ => None,
        }
    }
}

impl WebhookEvent {
    pub fn classify(payload: WebhookPayload) -> Self {
        let WebhookPayload {
            webhook_type,
            webhook_code,
            item_id,
            user_id,
            verification_status,
            status,
            error,
            new_webhook_url,
        } = payload;

        match (webhook_type.as_str(), webhook_code.as_str()) {
            ("ITEM", code) => {
                let event = match code {
                    "ERROR" => Some(ItemEvent::Error(error)),
                    "NEW_ACCOUNTS_AVAILABLE" => Some(ItemEvent::NewAccountsAvailable),
                    "PENDING_EXPIRATION" => Some(ItemEvent::PendingExpiration),
                    "USER_PERMISSION_REVOKED" => Some(ItemEvent::UserPermissionRevoked),
                    "WEBHOOK_UPDATE_ACKNOWLEDGED" => {
                        Some(ItemEvent::WebhookUpdateAcknowledged { new_webhook_url })
                    }
                    _ => None,
                };
                if let Some(event) = event {
                    return WebhookEvent::Item { item_id, event };
                }
            }
            ("INCOME", "INCOME_VERIFICATION") => {
                if let Some(status) = verification_status
                    .or(status)
                    .as_deref()
                    .and_then(IncomeVerificationStatus::parse)
                {
                    return WebhookEvent::IncomeVerification { user_id, status };
                }
            }
            _ => {}
        }

        WebhookEvent::Unhandled {
            webhook_type,
            webhook_code,
        }
    }
}
