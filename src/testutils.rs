use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use crate::db::{AccessToken, RecordBackend, UserId, UserRecord, UserToken};
use crate::plaid_api::{
    CreatedUser, LinkSessionConfig, LinkToken, Provider, ProviderError, PublicToken,
};

#[derive(Default)]
struct MemoryState {
    stored: Option<UserRecord>,
    saves: usize,
    fail_saves: bool,
}

/// [RecordBackend] that keeps the record in memory and counts writes
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn with_record(record: UserRecord) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().stored = Some(record);
        backend
    }

    pub fn failing() -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().fail_saves = true;
        backend
    }

    pub fn saves(&self) -> usize {
        self.state.lock().unwrap().saves
    }

    pub fn stored(&self) -> Option<UserRecord> {
        self.state.lock().unwrap().stored.clone()
    }
}

#[async_trait]
impl RecordBackend for MemoryBackend {
    async fn load(&self) -> Result<Option<UserRecord>> {
        Ok(self.stored())
    }

    async fn save(&self, record: &UserRecord) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_saves {
            bail!("Disk full");
        }
        state.saves += 1;
        state.stored = Some(record.clone());
        Ok(())
    }
}

/// [Provider] that answers like the Plaid sandbox and records what it was asked
#[derive(Default)]
pub struct FakeProvider {
    pub user_create_calls: AtomicUsize,
    pub created_user_ids: Mutex<Vec<UserId>>,
    pub link_sessions: Mutex<Vec<LinkSessionConfig>>,
    pub exchanged_public_tokens: Mutex<Vec<PublicToken>>,
    pub webhook_updates: Mutex<Vec<String>>,
    fail_user_create: bool,
    fail_exchange: bool,
}

impl FakeProvider {
    pub fn failing_user_create() -> Self {
        Self {
            fail_user_create: true,
            ..Default::default()
        }
    }

    pub fn failing_exchange() -> Self {
        Self {
            fail_exchange: true,
            ..Default::default()
        }
    }
}

fn invalid_input(error_code: &str) -> ProviderError {
    ProviderError::Api(json!({
        "error_type": "INVALID_INPUT",
        "error_code": error_code,
        "error_message": "fake provider error",
    }))
}

#[async_trait]
impl Provider for FakeProvider {
    async fn create_user(&self, client_user_id: &UserId) -> Result<CreatedUser, ProviderError> {
        // Give concurrent callers a chance to race
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.fail_user_create {
            return Err(invalid_input("INVALID_FIELD"));
        }
        let n = self.user_create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.created_user_ids
            .lock()
            .unwrap()
            .push(client_user_id.clone());
        Ok(CreatedUser {
            user_token: UserToken::new(format!("user-sandbox-{n}")),
            webhook_user_id: format!("webhook-user-{n}"),
        })
    }

    async fn create_link_token(
        &self,
        session: &LinkSessionConfig,
    ) -> Result<LinkToken, ProviderError> {
        let mut sessions = self.link_sessions.lock().unwrap();
        sessions.push(session.clone());
        Ok(LinkToken(format!("link-sandbox-{}", sessions.len())))
    }

    async fn exchange_public_token(
        &self,
        public_token: &PublicToken,
    ) -> Result<AccessToken, ProviderError> {
        if self.fail_exchange {
            return Err(invalid_input("INVALID_PUBLIC_TOKEN"));
        }
        self.exchanged_public_tokens
            .lock()
            .unwrap()
            .push(public_token.clone());
        Ok(AccessToken::new(format!("access-for-{}", public_token.0)))
    }

    async fn get_liabilities(&self, access_token: &AccessToken) -> Result<Value, ProviderError> {
        Ok(json!({
            "accounts": [],
            "liabilities": {"credit": [], "mortgage": [], "student": []},
            "requested_with": access_token.get(),
        }))
    }

    async fn get_payroll_income(&self, user_token: &UserToken) -> Result<Value, ProviderError> {
        Ok(json!({"items": [], "requested_with": user_token.get()}))
    }

    async fn get_bank_income(
        &self,
        user_token: &UserToken,
        count: i64,
    ) -> Result<Value, ProviderError> {
        Ok(json!({"bank_income": [], "count": count, "requested_with": user_token.get()}))
    }

    async fn update_item_webhook(
        &self,
        access_token: &AccessToken,
        webhook: &str,
    ) -> Result<Value, ProviderError> {
        self.webhook_updates
            .lock()
            .unwrap()
            .push(webhook.to_string());
        Ok(json!({"item": {"webhook": webhook}, "requested_with": access_token.get()}))
    }
}
