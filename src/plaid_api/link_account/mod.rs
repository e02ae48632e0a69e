mod exchange;
mod link_flow;
mod session;
mod tokens;

pub use exchange::{exchange_public_token, notify_income_success};
pub use link_flow::{build_link_session, link_token_create};
pub use session::{
    BankIncome, IncomeSourceType, IncomeVerification, LinkSessionConfig, LinkSessionRequest,
    LinkUser, Product,
};
pub use tokens::{LinkToken, PublicToken};
