use async_trait::async_trait;
use plaid::{
    model::{
        CreditBankIncomeGetRequestOptions, LinkTokenCreateRequestIncomeVerification,
        LinkTokenCreateRequestIncomeVerificationBankIncome, LinkTokenCreateRequestUser,
    },
    request::LinkTokenCreateRequired,
    PlaidClient,
};
use serde_json::Value;

use crate::db::{AccessToken, UserId, UserToken};

use super::{
    auth::PlaidCredentials,
    error::ProviderError,
    link_account::{LinkSessionConfig, LinkToken, PublicToken},
    provider::{CreatedUser, Provider},
};

/// [Provider] backed by the Plaid API. The base URL is taken from `PLAID_ENV`.
pub struct Plaid {
    client: PlaidClient,
}

impl Plaid {
    pub fn new(credentials: &PlaidCredentials) -> Plaid {
        Plaid {
            client: PlaidClient::with_auth(credentials.to_api_auth()),
        }
    }
}

#[async_trait]
impl Provider for Plaid {
    async fn create_user(&self, client_user_id: &UserId) -> Result<CreatedUser, ProviderError> {
        let response = self.client.user_create(client_user_id.get()).await?;
        Ok(CreatedUser {
            user_token: UserToken::new(response.user_token),
            webhook_user_id: response.user_id,
        })
    }

    async fn create_link_token(
        &self,
        session: &LinkSessionConfig,
    ) -> Result<LinkToken, ProviderError> {
        let products: Vec<&str> = session.products.iter().map(|p| p.as_str()).collect();
        let mut request = self
            .client
            .link_token_create(LinkTokenCreateRequired {
                client_name: session.client_name,
                country_codes: session.country_codes,
                language: session.language,
                user: LinkTokenCreateRequestUser {
                    client_user_id: session.user.client_user_id.get().to_string(),
                    ..Default::default()
                },
            })
            .products(&products)
            .webhook(&session.webhook);
        if let Some(user_token) = &session.user_token {
            request = request.user_token(user_token.get());
        }
        if let Some(income_verification) = &session.income_verification {
            request = request.income_verification(LinkTokenCreateRequestIncomeVerification {
                income_source_types: Some(
                    income_verification
                        .income_source_types
                        .iter()
                        .map(|source| source.as_str().to_string())
                        .collect(),
                ),
                bank_income: income_verification.bank_income.as_ref().map(|bank_income| {
                    LinkTokenCreateRequestIncomeVerificationBankIncome {
                        days_requested: bank_income.days_requested,
                        ..Default::default()
                    }
                }),
                ..Default::default()
            });
        }
        let response = request.await?;
        Ok(LinkToken(response.link_token))
    }

    async fn exchange_public_token(
        &self,
        public_token: &PublicToken,
    ) -> Result<AccessToken, ProviderError> {
        let response = self
            .client
            .item_public_token_exchange(&public_token.0)
            .await?;
        Ok(AccessToken::new(response.access_token))
    }

    async fn get_liabilities(&self, access_token: &AccessToken) -> Result<Value, ProviderError> {
        let response = self.client.liabilities_get(access_token.get()).await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn get_payroll_income(&self, user_token: &UserToken) -> Result<Value, ProviderError> {
        let response = self
            .client
            .credit_payroll_income_get()
            .user_token(user_token.get())
            .await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn get_bank_income(
        &self,
        user_token: &UserToken,
        count: i64,
    ) -> Result<Value, ProviderError> {
        let response = self
            .client
            .credit_bank_income_get()
            .user_token(user_token.get())
            .options(CreditBankIncomeGetRequestOptions { count: Some(count) })
            .await?;
        Ok(serde_json::to_value(response)?)
    }

    async fn update_item_webhook(
        &self,
        access_token: &AccessToken,
        webhook: &str,
    ) -> Result<Value, ProviderError> {
        let response = self
            .client
            .item_webhook_update(access_token.get())
            .webhook(webhook)
            .await?;
        Ok(serde_json::to_value(response)?)
    }
}
