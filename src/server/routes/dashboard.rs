//! Dashboard endpoint
//!
//! One aggregate call for the landing view: the caller's most recent owned
//! projects, the owned-project count, and a billing summary that is null
//! until the caller opens an account.

use crate::auth::Identity;
use crate::server::state::AppState;
use crate::storage::database::entities::{billing_account, invoice, project};
use actix_web::{HttpResponse, ResponseError, Result as ActixResult, web};
use serde::Serialize;

/// Billing summary block on the dashboard
#[derive(Debug, Serialize)]
pub struct DashboardBilling {
    #[serde(flatten)]
    pub account: billing_account::Model,
    pub invoices: Vec<invoice::Model>,
}

/// Dashboard response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub projects: Vec<project::Model>,
    pub project_count: u64,
    pub billing: Option<DashboardBilling>,
}

/// Configure dashboard routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/dashboard", web::get().to(get_dashboard));
}

/// Aggregate view for the landing dashboard
pub async fn get_dashboard(
    state: web::Data<AppState>,
    identity: Identity,
) -> ActixResult<HttpResponse> {
    let (project_count, projects) = match state.projects.dashboard_overview(&identity).await {
        Ok(overview) => overview,
        Err(e) => return Ok(e.error_response()),
    };

    let billing = match state.billing.dashboard_summary(&identity).await {
        Ok(summary) => summary.map(|(account, invoices)| DashboardBilling { account, invoices }),
        Err(e) => return Ok(e.error_response()),
    };

    Ok(HttpResponse::Ok().json(DashboardResponse {
        projects,
        project_count,
        billing,
    }))
}
