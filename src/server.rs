use anyhow::{Context as _, Result};
use std::sync::Arc;

use crate::app::App;
use crate::args::Args;
use crate::db::{RecordStore, UserRecordFile};
use crate::http_server;
use crate::plaid_api::{Plaid, Provider};
use crate::webhook::WebhookDispatcher;

pub async fn main(args: Args) -> Result<()> {
    let store = RecordStore::open(UserRecordFile::new(&args.user_data_file))
        .await
        .with_context(|| {
            format!(
                "Failed to load user record from {}",
                args.user_data_file.display()
            )
        })?;
    let store = Arc::new(store);
    let provider: Arc<dyn Provider> = Arc::new(Plaid::new(&args.plaid_credentials()));

    let app = App::new(Arc::clone(&store), provider, args.webhook_url.clone());
    let dispatcher = WebhookDispatcher::new(store);

    http_server::serve(
        http_server::app_server(args.app_listen(), app),
        http_server::webhook_server(args.webhook_listen(), dispatcher),
    )
    .await
}
