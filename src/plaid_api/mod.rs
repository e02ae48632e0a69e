mod auth;
mod client;
mod error;
mod link_account;
mod provider;

pub use auth::PlaidCredentials;
pub use client::Plaid;
pub use error::ProviderError;
pub use link_account::{
    build_link_session, exchange_public_token, link_token_create, notify_income_success,
    BankIncome, IncomeSourceType, IncomeVerification, LinkSessionConfig, LinkSessionRequest,
    LinkToken, LinkUser, Product, PublicToken,
};
pub use provider::{CreatedUser, Provider};
