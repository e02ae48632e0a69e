pub mod app;
pub mod args;
pub mod db;
pub mod error;
pub mod http_server;
pub mod plaid_api;
pub mod provisioner;
pub mod server;
pub mod status;
pub mod webhook;

#[cfg(test)]
mod testutils;
