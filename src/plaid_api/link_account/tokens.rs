use serde::Serialize;

/// Short-lived token that initializes the client-side Link flow
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct LinkToken(pub String);

/// Returned by a successful Link flow, exchanged once for an [crate::db::AccessToken]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicToken(pub String);
