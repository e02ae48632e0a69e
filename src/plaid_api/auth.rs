const PLAID_VERSION: &str = "2020-09-14";

#[derive(Clone)]
pub struct PlaidCredentials {
    client_id: String,
    secret: String,
}

impl PlaidCredentials {
    pub fn new(client_id: String, secret: String) -> Self {
        Self { client_id, secret }
    }

    pub fn to_api_auth(&self) -> plaid::PlaidAuth {
        plaid::PlaidAuth::ClientId {
            client_id: self.client_id.clone(),
            secret: self.secret.clone(),
            plaid_version: PLAID_VERSION.to_string(),
        }
    }
}

impl std::fmt::Debug for PlaidCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlaidCredentials({}, *****)", self.client_id)
    }
}
