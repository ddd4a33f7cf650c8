use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::session::AuthSession;
use crate::error::PortalError;
use crate::model::payroll::Payroll;
use crate::period::{DateRange, PeriodGroup, group_by_period_end};

/// Payslips of the signed-in employee, bucketed by month.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentHistory {
    #[schema(value_type = Option<String>, format = "date")]
    pub period_start: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = "date")]
    pub period_end: Option<NaiveDate>,
    #[schema(value_type = Vec<Object>)]
    pub groups: Vec<PeriodGroup<Payroll>>,
}

impl PaymentHistory {
    pub fn build(range: DateRange, payrolls: Vec<Payroll>) -> Self {
        Self {
            period_start: range.period_start,
            period_end: range.period_end,
            groups: group_by_period_end(range.filter(payrolls)),
        }
    }
}

/// Unset bounds default to January 1st through the end of the current month.
#[utoipa::path(
    get,
    path = "/api/payments",
    params(DateRange),
    responses((status = 200, body = PaymentHistory)),
    security(("session_cookie" = [])),
    tag = "Payroll"
)]
pub async fn list_payments(
    session: AuthSession,
    query: web::Query<DateRange>,
) -> Result<HttpResponse, PortalError> {
    let today = Local::now().date_naive();
    let range = query.into_inner().or(DateRange::year_to_month_end(today));

    let payrolls = session
        .client()
        .payrolls_for_user(session.user().id, &range)
        .await?;
    Ok(HttpResponse::Ok().json(PaymentHistory::build(range, payrolls)))
}
