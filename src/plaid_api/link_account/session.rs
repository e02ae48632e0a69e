use serde::Serialize;

use crate::db::{UserId, UserToken};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Liabilities,
    IncomeVerification,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Liabilities => "liabilities",
            Product::IncomeVerification => "income_verification",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSourceType {
    Bank,
    Payroll,
}

impl IncomeSourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeSourceType::Bank => "bank",
            IncomeSourceType::Payroll => "payroll",
        }
    }
}

/// Which Link flow the client wants to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSessionRequest {
    Liabilities,
    Income(IncomeSourceType),
}

/// Everything needed to ask Plaid for a link token. Serializes to the shape of Plaid's
/// `/link/token/create` request body.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkSessionConfig {
    pub client_name: &'static str,
    pub language: &'static str,
    pub country_codes: &'static [&'static str],
    pub user: LinkUser,
    pub products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_token: Option<UserToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_verification: Option<IncomeVerification>,
    pub webhook: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkUser {
    pub client_user_id: UserId,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IncomeVerification {
    pub income_source_types: Vec<IncomeSourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_income: Option<BankIncome>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BankIncome {
    pub days_requested: i64,
}
