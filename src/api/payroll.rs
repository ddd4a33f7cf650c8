use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::auth::session::AuthSession;
use crate::client::payroll::NewPayroll;
use crate::error::{FieldErrors, PortalError};
use crate::model::payroll::Payroll;
use crate::period::{
    DateRange, PayrollPeriodInput, PeriodEndPreview, PeriodGroup, group_by_period_end,
};
use crate::utils::{de, forms};

/// Always attached to every payroll run, whatever its type.
pub const DEFAULT_BONUSES: &[u64] = &[1];
pub const DEFAULT_DEDUCTIONS: &[u64] = &[1, 2];

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PayrollQuery {
    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[param(value_type = Option<String>, format = "date")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[param(value_type = Option<String>, format = "date")]
    pub period_end: Option<NaiveDate>,
    /// Keep only payrolls of employees with this contract type
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    pub contract_type_id: Option<u64>,
}

impl PayrollQuery {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.period_start, self.period_end)
    }
}

/// Payroll screen: pending and paid runs, each bucketed by month.
#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollBoard {
    #[schema(value_type = Vec<Object>)]
    pub pending: Vec<PeriodGroup<Payroll>>,
    #[schema(value_type = Vec<Object>)]
    pub paid: Vec<PeriodGroup<Payroll>>,
}

impl PayrollBoard {
    pub fn build(payrolls: Vec<Payroll>, contract_type_id: Option<u64>) -> Self {
        let (pending, paid): (Vec<Payroll>, Vec<Payroll>) = payrolls
            .into_iter()
            .filter(|p| contract_type_id.is_none() || p.contract_type_id() == contract_type_id)
            .partition(Payroll::is_pending);

        Self {
            pending: group_by_period_end(pending),
            paid: group_by_period_end(paid),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PayrollForm {
    #[validate(required(message = "El tipo de nómina es requerido"))]
    #[schema(example = 1)]
    pub payroll_type_id: Option<u64>,

    #[validate(required(message = "El tipo de contrato es requerido"))]
    #[schema(example = 3)]
    pub contract_type_id: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[validate(required(message = "La fecha de inicio es requerida"))]
    #[schema(example = "2025-02-01", value_type = Option<String>, format = "date")]
    pub period_start: Option<NaiveDate>,

    /// Ignored for the standard payroll type, where it is derived
    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[schema(value_type = Option<String>, format = "date")]
    pub period_end: Option<NaiveDate>,

    #[serde(default)]
    pub bonus: Vec<u64>,

    #[serde(default)]
    pub deductions: Vec<u64>,
}

fn with_defaults(selected: &[u64], defaults: &[u64]) -> Vec<u64> {
    let mut ids: Vec<u64> = defaults.iter().chain(selected).copied().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl PayrollForm {
    /// Checks the form and produces the backend body. Standard runs get their
    /// end date derived; every run gets the default bonus and deductions.
    pub fn resolve(self) -> Result<NewPayroll, PortalError> {
        let mut extra = FieldErrors::new();
        let derived = match (self.payroll_type_id, self.contract_type_id) {
            (Some(payroll_type_id), Some(contract_type_id)) => PayrollPeriodInput {
                payroll_type_id,
                contract_type_id,
                period_start: self.period_start,
            }
            .derived_end(),
            _ => None,
        };

        let period_end = derived.or(self.period_end);
        match (self.period_start, period_end) {
            (Some(start), Some(end)) if end < start => {
                extra.insert(
                    "period_end".to_string(),
                    "La fecha fin debe ser igual o posterior a la fecha de inicio".to_string(),
                );
            }
            (Some(_), None) => {
                extra.insert(
                    "period_end".to_string(),
                    "La fecha fin es requerida".to_string(),
                );
            }
            _ => {}
        }

        forms::merge(self.validate(), extra)?;

        // both checked above
        let (Some(payroll_type_id), Some(contract_type_id), Some(period_start), Some(period_end)) =
            (self.payroll_type_id, self.contract_type_id, self.period_start, period_end)
        else {
            return Err(PortalError::Internal("payroll form passed validation incomplete".into()));
        };

        Ok(NewPayroll {
            payroll_type_id,
            contract_type_id,
            period_start,
            period_end,
            bonus: with_defaults(&self.bonus, DEFAULT_BONUSES),
            deductions: with_defaults(&self.deductions, DEFAULT_DEDUCTIONS),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayForm {
    #[schema(example = json!([31, 32]))]
    pub payrolls: Vec<u64>,
}

#[utoipa::path(
    get,
    path = "/api/payrolls",
    params(PayrollQuery),
    responses((status = 200, body = PayrollBoard)),
    security(("session_cookie" = [])),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    session: AuthSession,
    query: web::Query<PayrollQuery>,
) -> Result<HttpResponse, PortalError> {
    let payrolls = session.client().list_payrolls(&query.range()).await?;
    Ok(HttpResponse::Ok().json(PayrollBoard::build(payrolls, query.contract_type_id)))
}

#[utoipa::path(
    post,
    path = "/api/payrolls",
    request_body = PayrollForm,
    responses(
        (status = 201, description = "Generated payrolls", body = [Payroll]),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Payroll"
)]
pub async fn create_payroll(
    session: AuthSession,
    form: web::Json<PayrollForm>,
) -> Result<HttpResponse, PortalError> {
    let payroll = form.into_inner().resolve()?;
    let created = session.client().create_payroll(&payroll).await?;

    info!(
        user_id = session.user().id,
        count = created.len(),
        period_start = %payroll.period_start,
        period_end = %payroll.period_end,
        "Payrolls generated"
    );
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    post,
    path = "/api/payrolls/pay",
    request_body = PayForm,
    responses(
        (status = 200, description = "Payrolls marked as paid"),
        (status = 422, description = "Nothing selected")
    ),
    security(("session_cookie" = [])),
    tag = "Payroll"
)]
pub async fn pay_payrolls(
    session: AuthSession,
    form: web::Json<PayForm>,
) -> Result<HttpResponse, PortalError> {
    if form.payrolls.is_empty() {
        return Err(PortalError::field("payrolls", "Seleccione al menos una nómina"));
    }

    session.client().pay_payrolls(&form.payrolls).await?;
    info!(user_id = session.user().id, count = form.payrolls.len(), "Payrolls paid");
    Ok(HttpResponse::Ok().json(json!({ "message": "Nóminas pagadas exitosamente" })))
}

/// Live preview of the end date while the form is being filled.
#[utoipa::path(
    get,
    path = "/api/payrolls/period-end",
    params(
        ("payroll_type_id" = u64, Query, description = "Payroll type id"),
        ("contract_type_id" = u64, Query, description = "Contract type id"),
        ("period_start" = Option<String>, Query, description = "Start date, YYYY-MM-DD")
    ),
    responses((status = 200, body = PeriodEndPreview)),
    security(("session_cookie" = [])),
    tag = "Payroll"
)]
pub async fn period_end(query: web::Query<PayrollPeriodInput>) -> HttpResponse {
    HttpResponse::Ok().json(query.preview())
}
