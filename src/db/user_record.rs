use serde::{Deserialize, Serialize};

use super::store::Change;
use super::tokens::{AccessToken, UserId, UserToken};

/// The single local user this server knows about, persisted as one JSON object.
///
/// Empty strings in the file are treated like missing values.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[cfg_attr(test, derive(PartialEq, Eq))]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<AccessToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    income_user_token: Option<UserToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    income_connected: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    webhook_user_id: Option<String>,
}

impl UserRecord {
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref().filter(|id| !id.get().is_empty())
    }

    /// Returns the stored user id, assigning one from `generate` if there is none yet.
    pub fn user_id_or_insert_with(
        &mut self,
        generate: impl FnOnce() -> UserId,
    ) -> Change<UserId> {
        if let Some(user_id) = self.user_id() {
            return Change::Unchanged(user_id.clone());
        }
        let user_id = generate();
        self.user_id = Some(user_id.clone());
        Change::Changed(user_id)
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref().filter(|t| !t.get().is_empty())
    }

    pub fn set_access_token(&mut self, access_token: AccessToken) {
        self.access_token = Some(access_token);
    }

    pub fn income_user_token(&self) -> Option<&UserToken> {
        self.income_user_token
            .as_ref()
            .filter(|t| !t.get().is_empty())
    }

    pub fn set_income_user_token(&mut self, user_token: UserToken, webhook_user_id: String) {
        self.income_user_token = Some(user_token);
        self.webhook_user_id = Some(webhook_user_id);
    }

    /// Only an explicit `true` counts, a missing flag means not connected.
    pub fn income_connected(&self) -> bool {
        self.income_connected == Some(true)
    }

    pub fn set_income_connected(&mut self, connected: bool) {
        self.income_connected = Some(connected);
    }

    pub fn webhook_user_id(&self) -> Option<&str> {
        self.webhook_user_id.as_deref().filter(|id| !id.is_empty())
    }
}
