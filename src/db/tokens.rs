use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

/// Long-lived credential for the user's linked liabilities item.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(access_token: String) -> AccessToken {
        AccessToken(access_token)
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(*****)")
    }
}

/// Provider-scoped token for income verification. Independent of [AccessToken].
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct UserToken(String);

impl UserToken {
    pub fn new(user_token: String) -> UserToken {
        UserToken(user_token)
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Debug for UserToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserToken(*****)")
    }
}

/// Our own identifier for the local user, sent to Plaid as `client_user_id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(user_id: String) -> UserId {
        UserId(user_id)
    }

    pub fn generate() -> UserId {
        UserId(format!("user_{}", Uuid::new_v4()))
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
