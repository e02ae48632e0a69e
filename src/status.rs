use crate::db::UserRecord;

/// What the client can show about the user's connections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub liability_connected: bool,
    pub income_connected: bool,
}

impl ConnectionStatus {
    /// Liabilities count as connected once we have a non-empty access token. Income is tracked
    /// separately through an explicit flag, since it's a different product.
    pub fn of(record: &UserRecord) -> Self {
        Self {
            liability_connected: record.access_token().is_some(),
            income_connected: record.income_connected(),
        }
    }
}
