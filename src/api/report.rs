use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::session::AuthSession;
use crate::client::BackendClient;
use crate::client::report::ReportQuery;
use crate::error::{PortalError, see_other};
use crate::model::payroll::Payroll;
use crate::period::DateRange;

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollReport {
    #[schema(value_type = Option<String>, format = "date")]
    pub period_start: Option<chrono::NaiveDate>,
    #[schema(value_type = Option<String>, format = "date")]
    pub period_end: Option<chrono::NaiveDate>,
    pub rows: Vec<Payroll>,
    pub total_income: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
    /// Spreadsheet download for the same filters
    pub export_url: String,
}

impl PayrollReport {
    fn build(query: &ReportQuery, rows: Vec<Payroll>, export_url: String) -> Self {
        let (income, deductions, net) = rows.iter().fold((0.0, 0.0, 0.0), |acc, p| {
            (
                acc.0 + p.total_income,
                acc.1 + p.total_deductions,
                acc.2 + p.net_salary,
            )
        });

        Self {
            period_start: query.period_start,
            period_end: query.period_end,
            rows,
            total_income: income,
            total_deductions: deductions,
            net_salary: net,
            export_url,
        }
    }
}

/// Missing dates default to January 1st through the end of the current month.
fn with_default_range(query: ReportQuery) -> ReportQuery {
    let range = DateRange::new(query.period_start, query.period_end)
        .or(DateRange::year_to_month_end(Local::now().date_naive()));
    ReportQuery {
        period_start: range.period_start,
        period_end: range.period_end,
        ..query
    }
}

#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportQuery),
    responses((status = 200, body = PayrollReport)),
    security(("session_cookie" = [])),
    tag = "Reports"
)]
pub async fn payroll_report(
    session: AuthSession,
    query: web::Query<ReportQuery>,
    backend: web::Data<BackendClient>,
) -> Result<HttpResponse, PortalError> {
    let query = with_default_range(query.into_inner());
    let rows = session.client().payroll_report(&query).await?;
    let export_url = backend.report_export_url(&query)?;
    Ok(HttpResponse::Ok().json(PayrollReport::build(&query, rows, export_url)))
}

/// Redirects the browser to the backend spreadsheet download.
#[utoipa::path(
    get,
    path = "/api/reports/export",
    params(ReportQuery),
    responses((status = 303, description = "Redirect to the backend download")),
    security(("session_cookie" = [])),
    tag = "Reports"
)]
pub async fn export(
    query: web::Query<ReportQuery>,
    backend: web::Data<BackendClient>,
) -> Result<HttpResponse, PortalError> {
    let query = with_default_range(query.into_inner());
    let url = backend.report_export_url(&query)?;
    Ok(see_other(&url))
}
