use rocket::{data::Capped, post, routes, serde::json::Json, Route, State};

use crate::webhook::{Acknowledgement, WebhookDispatcher};

pub fn routes() -> Vec<Route> {
    routes![receive_webhook]
}

// Takes raw bytes instead of Json<_> so that malformed or oversized bodies still get acknowledged
#[post("/server/receive_webhook", data = "<body>")]
async fn receive_webhook(
    body: Capped<Vec<u8>>,
    dispatcher: &State<WebhookDispatcher>,
) -> Json<Acknowledgement> {
    if !body.is_complete() {
        log::warn!(
            "Ignoring webhook larger than the {} byte limit",
            body.len()
        );
        return Json(Acknowledgement::received());
    }
    Json(dispatcher.dispatch(&body).await)
}
