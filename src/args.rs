use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::http_server::ListenConfig;
use crate::plaid_api::PlaidCredentials;

/// Sample server for Plaid income and liabilities verification.
///
/// Every option can also be set through its environment variable or a `.env` file.
#[derive(Parser)]
#[command(version)]
pub struct Args {
    /// File the local user's tokens are stored in
    #[arg(long, env = "USER_DATA_FILE", default_value = "user_data.json")]
    pub user_data_file: PathBuf,

    /// Address the app listener binds to
    #[arg(long, env = "APP_ADDRESS", default_value = "127.0.0.1")]
    pub address: IpAddr,

    #[arg(long, env = "APP_PORT", default_value_t = 8080)]
    pub app_port: u16,

    /// Address the webhook listener binds to
    #[arg(long, env = "WEBHOOK_ADDRESS", default_value = "0.0.0.0")]
    pub webhook_address: IpAddr,

    #[arg(long, env = "WEBHOOK_PORT", default_value_t = 8001)]
    pub webhook_port: u16,

    /// Public URL Plaid should send webhooks to
    #[arg(
        long,
        env = "WEBHOOK_URL",
        default_value = "http://localhost:8001/server/receive_webhook"
    )]
    pub webhook_url: String,

    #[arg(long, env = "PLAID_CLIENT_ID")]
    pub plaid_client_id: String,

    #[arg(long, env = "PLAID_SECRET", hide_env_values = true)]
    pub plaid_secret: String,
}

impl Args {
    pub fn plaid_credentials(&self) -> PlaidCredentials {
        PlaidCredentials::new(self.plaid_client_id.clone(), self.plaid_secret.clone())
    }

    pub fn app_listen(&self) -> ListenConfig {
        ListenConfig {
            address: self.address,
            port: self.app_port,
        }
    }

    pub fn webhook_listen(&self) -> ListenConfig {
        ListenConfig {
            address: self.webhook_address,
            port: self.webhook_port,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
