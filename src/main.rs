use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = dotenv {
        if !err.not_found() {
            log::warn!("Failed to load .env file: {err}");
        }
    }

    let args = plaid_income_liabilities::args::parse();
    plaid_income_liabilities::server::main(args).await
}
