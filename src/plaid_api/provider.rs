use async_trait::async_trait;
use serde_json::Value;

use crate::db::{AccessToken, UserId, UserToken};

use super::{
    error::ProviderError,
    link_account::{LinkSessionConfig, LinkToken, PublicToken},
};

/// Result of creating a Plaid user for income verification
#[derive(Debug, Clone)]
pub struct CreatedUser {
    pub user_token: UserToken,
    /// Plaid's id for the user, used to correlate income webhooks.
    pub webhook_user_id: String,
}

/// The operations we use from the aggregation provider.
///
/// Data fetches return the provider payload as-is, since we only pass it through to the client.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn create_user(&self, client_user_id: &UserId) -> Result<CreatedUser, ProviderError>;

    async fn create_link_token(
        &self,
        session: &LinkSessionConfig,
    ) -> Result<LinkToken, ProviderError>;

    async fn exchange_public_token(
        &self,
        public_token: &PublicToken,
    ) -> Result<AccessToken, ProviderError>;

    async fn get_liabilities(&self, access_token: &AccessToken) -> Result<Value, ProviderError>;

    async fn get_payroll_income(&self, user_token: &UserToken) -> Result<Value, ProviderError>;

    async fn get_bank_income(
        &self,
        user_token: &UserToken,
        count: i64,
    ) -> Result<Value, ProviderError>;

    async fn update_item_webhook(
        &self,
        access_token: &AccessToken,
        webhook: &str,
    ) -> Result<Value, ProviderError>;
}
