use serde::Serialize;
use std::sync::Arc;

use crate::db::RecordStore;

use super::event::{IncomeVerificationStatus, ItemEvent, WebhookEvent, WebhookPayload};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    status: &'static str,
}

impl Acknowledgement {
    pub fn received() -> Self {
        Self { status: "received" }
    }
}

/// Handles Plaid webhooks. Events are only logged for now, none of them change the user record.
///
/// Every webhook gets acknowledged, even unknown or malformed ones, because Plaid keeps
/// retrying deliveries that weren't.
// TODO Verify the Plaid-Verification JWT before trusting a webhook body
pub struct WebhookDispatcher {
    store: Arc<RecordStore>,
}

impl WebhookDispatcher {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn dispatch(&self, body: &[u8]) -> Acknowledgement {
        match serde_json::from_slice::<WebhookPayload>(body) {
            Ok(payload) => self.handle(WebhookEvent::classify(payload)).await,
            Err(err) => log::warn!("Ignoring malformed webhook: {err}"),
        }
        Acknowledgement::received()
    }

    pub async fn handle(&self, event: WebhookEvent) {
        match event {
            WebhookEvent::Item { item_id, event } => {
                let item_id = item_id.as_deref().unwrap_or("<unknown>");
                handle_item_event(item_id, event);
            }
            WebhookEvent::IncomeVerification { user_id, status } => {
                self.handle_income_verification(user_id, status).await;
            }
            WebhookEvent::Unhandled {
                webhook_type,
                webhook_code,
            } => {
                log::info!("Unhandled webhook {webhook_type}/{webhook_code}");
            }
        }
    }

    async fn handle_income_verification(
        &self,
        user_id: Option<String>,
        status: IncomeVerificationStatus,
    ) {
        let user_id = user_id.unwrap_or_else(|| "<unknown>".to_string());
        let our_user_id = self
            .store
            .read(|record| record.webhook_user_id().map(str::to_string))
            .await;
        if our_user_id.as_deref() != Some(user_id.as_str()) {
            log::warn!("Income webhook is for user {user_id}, which isn't the local user");
        }
        match status {
            IncomeVerificationStatus::ProcessingComplete => {
                log::info!("Income data for user {user_id} is ready and can be fetched again");
            }
            IncomeVerificationStatus::ProcessingFailed => {
                log::warn!(
                    "Income processing failed for user {user_id}, they should submit their documents again"
                );
            }
            IncomeVerificationStatus::PendingApproval => {
                log::info!(
                    "User {user_id} needs to approve sharing their income data before processing continues"
                );
            }
        }
    }
}

fn handle_item_event(item_id: &str, event: ItemEvent) {
    match event {
        ItemEvent::Error(error) => {
            // Stays log-only, the access token is kept until the user reconnects
            log::error!(
                "Item {item_id} is broken and the user needs to reconnect: {}",
                error.map(|e| e.to_string()).unwrap_or_default()
            );
        }
        ItemEvent::NewAccountsAvailable => {
            log::info!("Item {item_id} has new accounts the user could share with us");
        }
        ItemEvent::PendingExpiration => {
            log::warn!("Item {item_id} will need to be reconnected soon");
        }
        ItemEvent::UserPermissionRevoked => {
            log::warn!("User revoked access for item {item_id}");
        }
        ItemEvent::WebhookUpdateAcknowledged { new_webhook_url } => {
            log::info!(
                "Webhook for item {item_id} is now {}",
                new_webhook_url.as_deref().unwrap_or("<unknown>")
            );
        }
    }
}
