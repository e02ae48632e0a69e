use serde_json::Value;
use std::sync::Arc;

use crate::db::{RecordStore, UserRecord, UserToken};
use crate::error::ApiError;
use crate::plaid_api::{self, LinkSessionRequest, LinkToken, Provider};
use crate::provisioner::TokenProvisioner;
use crate::status::ConnectionStatus;

const BANK_INCOME_REPORT_COUNT: i64 = 3;

/// State shared by the app routes. Owns the provider connection and the user record.
pub struct App {
    store: Arc<RecordStore>,
    provider: Arc<dyn Provider>,
    provisioner: TokenProvisioner,
    webhook_url: String,
}

impl App {
    pub fn new(store: Arc<RecordStore>, provider: Arc<dyn Provider>, webhook_url: String) -> Self {
        let provisioner = TokenProvisioner::new(Arc::clone(&store), Arc::clone(&provider));
        Self {
            store,
            provider,
            provisioner,
            webhook_url,
        }
    }

    pub async fn status(&self) -> ConnectionStatus {
        self.store.read(ConnectionStatus::of).await
    }

    pub async fn generate_link_token(
        &self,
        request: LinkSessionRequest,
    ) -> Result<LinkToken, ApiError> {
        let session =
            plaid_api::build_link_session(&self.provisioner, &self.webhook_url, request).await?;
        Ok(plaid_api::link_token_create(self.provider.as_ref(), &session).await?)
    }

    pub async fn swap_public_token(&self, public_token: Option<&str>) -> Result<(), ApiError> {
        plaid_api::exchange_public_token(self.provider.as_ref(), &self.store, public_token).await?;
        Ok(())
    }

    pub async fn income_was_successful(&self) {
        plaid_api::notify_income_success(&self.store).await;
    }

    pub async fn liabilities(&self) -> Result<Value, ApiError> {
        let access_token = self
            .store
            .read(|r| r.access_token().cloned())
            .await
            .ok_or(ApiError::NotConnected("access token"))?;
        log::info!("Requesting liabilities...");
        let liabilities = self.provider.get_liabilities(&access_token).await?;
        log::info!("Requesting liabilities...done");
        Ok(liabilities)
    }

    pub async fn payroll_income(&self) -> Result<Value, ApiError> {
        let user_token = self.income_user_token().await?;
        log::info!("Requesting payroll income...");
        let income = self.provider.get_payroll_income(&user_token).await?;
        log::info!("Requesting payroll income...done");
        Ok(income)
    }

    pub async fn bank_income(&self) -> Result<Value, ApiError> {
        let user_token = self.income_user_token().await?;
        log::info!("Requesting bank income...");
        let income = self
            .provider
            .get_bank_income(&user_token, BANK_INCOME_REPORT_COUNT)
            .await?;
        log::info!("Requesting bank income...done");
        Ok(income)
    }

    pub async fn update_webhook(&self, new_url: &str) -> Result<Value, ApiError> {
        let access_token = self
            .store
            .read(|r| r.access_token().cloned())
            .await
            .ok_or(ApiError::NotConnected("access token"))?;
        log::info!("Updating item webhook to {new_url}...");
        let response = self
            .provider
            .update_item_webhook(&access_token, new_url)
            .await?;
        log::info!("Updating item webhook...done");
        Ok(response)
    }

    async fn income_user_token(&self) -> Result<UserToken, ApiError> {
        self.store
            .read(|record: &UserRecord| record.income_user_token().cloned())
            .await
            .ok_or(ApiError::NotConnected("income user token"))
    }
}
