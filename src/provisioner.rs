use std::sync::Arc;
use tokio::sync::Mutex;

use crate::db::{Change, RecordStore, UserId, UserRecord, UserToken};
use crate::plaid_api::{Provider, ProviderError};

/// Lazily creates the local user id and the Plaid user token, each at most once.
pub struct TokenProvisioner {
    store: Arc<RecordStore>,
    provider: Arc<dyn Provider>,
    // Held while a user token is being created, so concurrent callers wait for that one
    // instead of creating a second Plaid user.
    provisioning: Mutex<()>,
}

impl TokenProvisioner {
    pub fn new(store: Arc<RecordStore>, provider: Arc<dyn Provider>) -> Self {
        Self {
            store,
            provider,
            provisioning: Mutex::new(()),
        }
    }

    pub async fn lazy_user_id(&self) -> UserId {
        if let Some(user_id) = self.store.read(|r| r.user_id().cloned()).await {
            return user_id;
        }
        // Checked again under the store lock, a concurrent caller may have assigned one by now
        match self
            .store
            .update_if_changed(|record| record.user_id_or_insert_with(UserId::generate))
            .await
        {
            Change::Changed(user_id) => {
                log::info!("Assigned user id {user_id}");
                user_id
            }
            Change::Unchanged(user_id) => user_id,
        }
    }

    pub async fn fetch_or_create_user_token(&self) -> Result<UserToken, ProviderError> {
        if let Some(user_token) = self.stored_user_token().await {
            return Ok(user_token);
        }

        let _provisioning = self.provisioning.lock().await;
        if let Some(user_token) = self.stored_user_token().await {
            return Ok(user_token);
        }

        let user_id = self.lazy_user_id().await;
        log::info!("Creating Plaid user for {user_id}...");
        let created = self.provider.create_user(&user_id).await?;
        let user_token = created.user_token.clone();
        self.store
            .update(|record| record.set_income_user_token(created.user_token, created.webhook_user_id))
            .await;
        log::info!("Creating Plaid user for {user_id}...done");

        Ok(user_token)
    }

    async fn stored_user_token(&self) -> Option<UserToken> {
        self.store
            .read(|record: &UserRecord| record.income_user_token().cloned())
            .await
    }
}
