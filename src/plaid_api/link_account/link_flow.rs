use crate::plaid_api::{Provider, ProviderError};
use crate::provisioner::TokenProvisioner;

use super::{
    session::{
        BankIncome, IncomeSourceType, IncomeVerification, LinkSessionConfig, LinkSessionRequest,
        LinkUser, Product,
    },
    tokens::LinkToken,
};

const CLIENT_NAME: &str = "Todd's Hoverboards";
const COUNTRY_CODES: &[&str] = &["US"];
const LANGUAGE: &str = "en";
const BANK_INCOME_DAYS_REQUESTED: i64 = 60;

/// Builds the link token request for the given flow. Income flows need a user token, which is
/// created on first use.
pub async fn build_link_session(
    provisioner: &TokenProvisioner,
    webhook: &str,
    request: LinkSessionRequest,
) -> Result<LinkSessionConfig, ProviderError> {
    let (products, user_token, income_verification) = match request {
        LinkSessionRequest::Liabilities => (vec![Product::Liabilities], None, None),
        LinkSessionRequest::Income(source_type) => {
            let user_token = provisioner.fetch_or_create_user_token().await?;
            let bank_income = match source_type {
                IncomeSourceType::Bank => Some(BankIncome {
                    days_requested: BANK_INCOME_DAYS_REQUESTED,
                }),
                IncomeSourceType::Payroll => None,
            };
            (
                vec![Product::IncomeVerification],
                Some(user_token),
                Some(IncomeVerification {
                    income_source_types: vec![source_type],
                    bank_income,
                }),
            )
        }
    };
    Ok(LinkSessionConfig {
        client_name: CLIENT_NAME,
        language: LANGUAGE,
        country_codes: COUNTRY_CODES,
        user: LinkUser {
            client_user_id: provisioner.lazy_user_id().await,
        },
        products,
        user_token,
        income_verification,
        webhook: webhook.to_string(),
    })
}

pub async fn link_token_create(
    provider: &dyn Provider,
    session: &LinkSessionConfig,
) -> Result<LinkToken, ProviderError> {
    log::info!("Creating link token for {:?}...", session.products);
    let link_token = provider.create_link_token(session).await?;
    log::info!("Creating link token...done");
    Ok(link_token)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::sync::{atomic::Ordering, Arc};

    use crate::db::{RecordStore, UserRecord};
    use crate::testutils::{FakeProvider, MemoryBackend};

    use super::*;

    const WEBHOOK: &str = "https://example.com/server/receive_webhook";

    async fn provisioner(provider: FakeProvider) -> (TokenProvisioner, Arc<FakeProvider>) {
        let store = Arc::new(
            RecordStore::open(MemoryBackend::with_record(UserRecord::default()))
                .await
                .unwrap(),
        );
        let provider = Arc::new(provider);
        (
            TokenProvisioner::new(store, Arc::clone(&provider) as Arc<dyn Provider>),
            provider,
        )
    }

    #[tokio::test]
    async fn liabilities_session_has_no_user_token() {
        let (provisioner, provider) = provisioner(FakeProvider::default()).await;

        let session = build_link_session(&provisioner, WEBHOOK, LinkSessionRequest::Liabilities)
            .await
            .unwrap();

        assert_eq!(vec![Product::Liabilities], session.products);
        assert_eq!(None, session.user_token);
        assert_eq!(None, session.income_verification);
        assert_eq!(WEBHOOK, session.webhook);
        assert_eq!(0, provider.user_create_calls.load(Ordering::SeqCst));

        let body = serde_json::to_value(&session).unwrap();
        assert_eq!(json!(["liabilities"]), body["products"]);
        assert!(body.get("user_token").is_none());
    }

    #[tokio::test]
    async fn bank_income_session_requests_60_days() {
        let (provisioner, _) = provisioner(FakeProvider::default()).await;

        let session = build_link_session(
            &provisioner,
            WEBHOOK,
            LinkSessionRequest::Income(IncomeSourceType::Bank),
        )
        .await
        .unwrap();

        let body = serde_json::to_value(&session).unwrap();
        assert_eq!(json!(["income_verification"]), body["products"]);
        assert_eq!("user-sandbox-1", body["user_token"]);
        assert_eq!(
            json!({
                "income_source_types": ["bank"],
                "bank_income": {"days_requested": 60},
            }),
            body["income_verification"]
        );
        assert_eq!(WEBHOOK, body["webhook"]);
    }

    #[tokio::test]
    async fn payroll_income_session_has_no_lookback() {
        let (provisioner, _) = provisioner(FakeProvider::default()).await;

        let session = build_link_session(
            &provisioner,
            WEBHOOK,
            LinkSessionRequest::Income(IncomeSourceType::Payroll),
        )
        .await
        .unwrap();

        let body = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json!({"income_source_types": ["payroll"]}),
            body["income_verification"]
        );
        assert!(session.user_token.is_some());
    }

    #[tokio::test]
    async fn income_sessions_share_one_user_token() {
        let (provisioner, provider) = provisioner(FakeProvider::default()).await;

        let bank = build_link_session(
            &provisioner,
            WEBHOOK,
            LinkSessionRequest::Income(IncomeSourceType::Bank),
        )
        .await
        .unwrap();
        let payroll = build_link_session(
            &provisioner,
            WEBHOOK,
            LinkSessionRequest::Income(IncomeSourceType::Payroll),
        )
        .await
        .unwrap();

        assert_eq!(bank.user_token, payroll.user_token);
        assert_eq!(bank.user, payroll.user);
        assert_eq!(1, provider.user_create_calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn concurrent_sessions_share_one_user_id() {
        let (provisioner, provider) = provisioner(FakeProvider::default()).await;

        let (liabilities, income) = tokio::join!(
            build_link_session(&provisioner, WEBHOOK, LinkSessionRequest::Liabilities),
            build_link_session(
                &provisioner,
                WEBHOOK,
                LinkSessionRequest::Income(IncomeSourceType::Bank),
            ),
        );

        let liabilities = liabilities.unwrap();
        let income = income.unwrap();
        assert_eq!(liabilities.user, income.user);
        assert_eq!(
            vec![liabilities.user.client_user_id.clone()],
            *provider.created_user_ids.lock().unwrap()
        );
    }

    #[tokio::test]
    async fn income_session_fails_without_user_token() {
        let (provisioner, _) = provisioner(FakeProvider::failing_user_create()).await;

        let err = build_link_session(
            &provisioner,
            WEBHOOK,
            LinkSessionRequest::Income(IncomeSourceType::Bank),
        )
        .await
        .unwrap_err();

        match err {
            ProviderError::Api(payload) => assert_eq!("INVALID_FIELD", payload["error_code"]),
            err => panic!("Unexpected error: {err:?}"),
        }
    }

    #[tokio::test]
    async fn link_token_is_requested_from_provider() {
        let (provisioner, provider) = provisioner(FakeProvider::default()).await;
        let session = build_link_session(&provisioner, WEBHOOK, LinkSessionRequest::Liabilities)
            .await
            .unwrap();

        let link_token = link_token_create(provider.as_ref(), &session)
            .await
            .unwrap();

        assert_eq!(LinkToken("link-sandbox-1".to_string()), link_token);
        assert_eq!(vec![session], *provider.link_sessions.lock().unwrap());
    }
}
