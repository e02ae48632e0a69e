use rocket::{get, post, routes, serde::json::Json, Route, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::error::ApiError;
use crate::plaid_api::{IncomeSourceType, LinkSessionRequest};

pub fn routes() -> Vec<Route> {
    routes![
        get_user_info,
        generate_link_token,
        swap_public_token,
        income_was_successful,
        fetch_liabilities,
        get_payroll_income,
        get_bank_income,
        update_webhook,
    ]
}

#[derive(Deserialize, Debug)]
struct GenerateLinkTokenBody {
    #[serde(default)]
    income: bool,
    #[serde(default, rename = "incomeType")]
    income_type: Option<String>,
}

impl GenerateLinkTokenBody {
    fn request(&self) -> LinkSessionRequest {
        if !self.income {
            return LinkSessionRequest::Liabilities;
        }
        match self.income_type.as_deref() {
            Some("payroll") => LinkSessionRequest::Income(IncomeSourceType::Payroll),
            _ => LinkSessionRequest::Income(IncomeSourceType::Bank),
        }
    }
}

#[derive(Deserialize, Debug)]
struct SwapPublicTokenBody {
    #[serde(default)]
    public_token: Option<String>,
}

#[derive(Deserialize, Debug)]
struct UpdateWebhookBody {
    #[serde(rename = "newUrl")]
    new_url: String,
}

/// Without `income`, reports both products. With it, only the requested one as `{status}`.
#[get("/appServer/getUserInfo?<income>")]
async fn get_user_info(income: Option<bool>, app: &State<App>) -> Json<Value> {
    let status = app.status().await;
    Json(match income {
        None => json!({
            "liability_status": status.liability_connected,
            "income_status": status.income_connected,
        }),
        Some(true) => json!({ "status": status.income_connected }),
        Some(false) => json!({ "status": status.liability_connected }),
    })
}

#[post("/appServer/generateLinkToken", data = "<body>")]
async fn generate_link_token(
    body: Json<GenerateLinkTokenBody>,
    app: &State<App>,
) -> Result<Json<Value>, ApiError> {
    let link_token = app.generate_link_token(body.request()).await?;
    Ok(Json(json!({ "link_token": link_token })))
}

#[post("/appServer/swapPublicToken", data = "<body>")]
async fn swap_public_token(
    body: Json<SwapPublicTokenBody>,
    app: &State<App>,
) -> Result<Json<Value>, ApiError> {
    app.swap_public_token(body.public_token.as_deref()).await?;
    Ok(Json(json!({ "status": "success" })))
}

#[post("/appServer/incomeWasSuccessful")]
async fn income_was_successful(app: &State<App>) -> Json<Value> {
    app.income_was_successful().await;
    Json(json!({ "status": true }))
}

#[get("/appServer/fetch_liabilities")]
async fn fetch_liabilities(app: &State<App>) -> Result<Json<Value>, ApiError> {
    Ok(Json(app.liabilities().await?))
}

#[get("/appServer/getPayrollIncome")]
async fn get_payroll_income(app: &State<App>) -> Result<Json<Value>, ApiError> {
    Ok(Json(app.payroll_income().await?))
}

#[get("/appServer/getBankIncome")]
async fn get_bank_income(app: &State<App>) -> Result<Json<Value>, ApiError> {
    Ok(Json(app.bank_income().await?))
}

#[post("/server/update_webhook", data = "<body>")]
async fn update_webhook(
    body: Json<UpdateWebhookBody>,
    app: &State<App>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(app.update_webhook(&body.new_url).await?))
}
