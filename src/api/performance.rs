use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::auth::session::AuthSession;
use crate::error::{FieldErrors, PortalError};
use crate::model::performance::PerformanceEvaluation;
use crate::period::{DateRange, PeriodGroup, group_by_period_end};
use crate::utils::{de, forms};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EvaluationQuery {
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    /// Ignored for employees, who only see their own evaluations
    pub employee_id: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[param(value_type = Option<String>, format = "date")]
    pub period_start: Option<NaiveDate>,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[param(value_type = Option<String>, format = "date")]
    pub period_end: Option<NaiveDate>,
}

impl EvaluationQuery {
    /// Missing dates default to January 1st through the end of the current month.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.period_start, self.period_end)
            .or(DateRange::year_to_month_end(Local::now().date_naive()))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluationBoard {
    #[schema(value_type = Vec<Object>)]
    pub groups: Vec<PeriodGroup<PerformanceEvaluation>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EvaluationForm {
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    #[validate(required(message = "El empleado es requerido"))]
    #[schema(example = 4)]
    pub employee_id: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    #[validate(
        required(message = "La calificación es requerida"),
        range(max = 5, message = "La calificación debe estar entre 0 y 5")
    )]
    #[schema(example = 4)]
    pub quality_of_work: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    #[validate(
        required(message = "La calificación es requerida"),
        range(max = 5, message = "La calificación debe estar entre 0 y 5")
    )]
    #[schema(example = 5)]
    pub achievement_of_objectives: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    #[validate(
        required(message = "La calificación es requerida"),
        range(max = 5, message = "La calificación debe estar entre 0 y 5")
    )]
    #[schema(example = 4)]
    pub responsibility: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    #[validate(
        required(message = "La calificación es requerida"),
        range(max = 5, message = "La calificación debe estar entre 0 y 5")
    )]
    #[schema(example = 3)]
    pub teamwork_communication: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    #[validate(
        required(message = "La calificación es requerida"),
        range(max = 5, message = "La calificación debe estar entre 0 y 5")
    )]
    #[schema(example = 4)]
    pub proactivity: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[validate(required(message = "La fecha de inicio es requerida"))]
    #[schema(example = "2025-01-01", value_type = Option<String>, format = "date")]
    pub start_period: Option<NaiveDate>,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[validate(required(message = "La fecha fin es requerida"))]
    #[schema(example = "2025-03-31", value_type = Option<String>, format = "date")]
    pub end_period: Option<NaiveDate>,
}

impl EvaluationForm {
    pub fn check(&self) -> Result<(), PortalError> {
        let mut extra = FieldErrors::new();
        if let (Some(start), Some(end)) = (self.start_period, self.end_period) {
            if end < start {
                extra.insert(
                    "end_period".to_string(),
                    "La fecha fin debe ser igual o posterior a la fecha de inicio".to_string(),
                );
            }
        }
        forms::merge(self.validate(), extra)
    }
}

#[utoipa::path(
    get,
    path = "/api/performance-evaluations",
    params(EvaluationQuery),
    responses((status = 200, body = EvaluationBoard)),
    security(("session_cookie" = [])),
    tag = "Performance"
)]
pub async fn list_evaluations(
    session: AuthSession,
    query: web::Query<EvaluationQuery>,
) -> Result<HttpResponse, PortalError> {
    let employee_id = if session.is_admin() {
        query.employee_id
    } else {
        Some(session.require_employee()?)
    };

    let evaluations = session.client().list_evaluations(employee_id).await?;
    let groups = group_by_period_end(query.range().filter(evaluations));
    Ok(HttpResponse::Ok().json(EvaluationBoard { groups }))
}

#[utoipa::path(
    post,
    path = "/api/performance-evaluations",
    request_body = EvaluationForm,
    responses(
        (status = 201, description = "Evaluation created"),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Performance"
)]
pub async fn create_evaluation(
    session: AuthSession,
    form: web::Json<EvaluationForm>,
) -> Result<HttpResponse, PortalError> {
    session.require_admin()?;
    form.check()?;

    let evaluation = session.client().create_evaluation(&form.into_inner()).await?;
    info!(
        evaluation_id = evaluation.id,
        employee_id = evaluation.employee_id,
        by = session.user().id,
        "Performance evaluation created"
    );
    Ok(HttpResponse::Created().json(json!({
        "message": "Evaluación creada exitosamente",
        "data": evaluation
    })))
}
