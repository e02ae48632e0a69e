use crate::db::RecordStore;
use crate::plaid_api::{Provider, ProviderError};

use super::tokens::PublicToken;

/// Swaps the public token from a finished liabilities Link flow for an access token and stores it.
///
/// A missing or empty public token is ignored.
pub async fn exchange_public_token(
    provider: &dyn Provider,
    store: &RecordStore,
    public_token: Option<&str>,
) -> Result<(), ProviderError> {
    let Some(public_token) = public_token.filter(|token| !token.is_empty()) else {
        log::warn!("Got no public token to exchange, ignoring");
        return Ok(());
    };

    log::info!("Exchanging public token...");
    let access_token = provider
        .exchange_public_token(&PublicToken(public_token.to_string()))
        .await?;
    store
        .update(|record| record.set_access_token(access_token))
        .await;
    log::info!("Exchanging public token...done");

    Ok(())
}

/// Income flows don't hand us a token to exchange, the client tells us when one succeeded.
pub async fn notify_income_success(store: &RecordStore) {
    store
        .update(|record| record.set_income_connected(true))
        .await;
    log::info!("Income source connected");
}
