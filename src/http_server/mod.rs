use anyhow::Result;
use rocket::{
    catchers,
    data::{Limits, ToByteUnit as _},
    Build, Config, Rocket,
};
use std::net::IpAddr;

use crate::app::App;
use crate::error::json_error;
use crate::webhook::WebhookDispatcher;

mod app_routes;
mod webhook_routes;

const BODY_LIMIT_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct ListenConfig {
    pub address: IpAddr,
    pub port: u16,
}

fn rocket_config(listen: ListenConfig) -> Config {
    Config {
        log_level: rocket::config::LogLevel::Critical,
        address: listen.address,
        port: listen.port,
        limits: Limits::default().limit("bytes", BODY_LIMIT_BYTES.bytes()),
        ..Default::default()
    }
}

/// The app listener, serving the client's requests
pub fn app_server(listen: ListenConfig, app: App) -> Rocket<Build> {
    rocket::custom(rocket_config(listen))
        .manage(app)
        .mount("/", app_routes::routes())
        .register("/", catchers![json_error])
}

/// The webhook listener. It's separate from the app listener so it can be exposed to Plaid
/// without exposing the app routes.
pub fn webhook_server(listen: ListenConfig, dispatcher: WebhookDispatcher) -> Rocket<Build> {
    rocket::custom(rocket_config(listen))
        .manage(dispatcher)
        .mount("/", webhook_routes::routes())
        .register("/", catchers![json_error])
}

/// Runs both listeners until one of them shuts down
pub async fn serve(app_server: Rocket<Build>, webhook_server: Rocket<Build>) -> Result<()> {
    let app_server = app_server.ignite().await?;
    let webhook_server = webhook_server.ignite().await?;
    log::info!(
        "Server is up and running at http://{}:{}/",
        app_server.config().address,
        app_server.config().port
    );
    log::info!(
        "Listening for webhooks at http://{}:{}/server/receive_webhook",
        webhook_server.config().address,
        webhook_server.config().port
    );

    tokio::try_join!(app_server.launch(), webhook_server.launch())?;
    Ok(())
}
