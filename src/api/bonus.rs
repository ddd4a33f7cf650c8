use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::catalog;
use crate::auth::session::AuthSession;
use crate::confirm::{ConfirmationGate, PendingConfirmation};
use crate::error::PortalError;
use crate::model::bonus::Bonus;
use crate::notify::NotificationCenter;
use crate::utils::{de, forms::not_blank};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct BonusForm {
    #[validate(custom(function = "not_blank", message = "El nombre es requerido"))]
    #[schema(example = "Bonificación incentivo")]
    pub bonu_name: String,

    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    #[validate(
        required(message = "El porcentaje es requerido"),
        range(min = 0.0, max = 100.0, message = "El porcentaje debe estar entre 0 y 100")
    )]
    #[schema(example = 0.0)]
    pub bonu_percentage: Option<f64>,

    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    #[validate(range(min = 0.0, message = "El monto fijo no puede ser negativo"))]
    #[schema(example = 250.0)]
    pub bonu_fixed_amount: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/bonus",
    responses((status = 200, body = [Bonus])),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn list_bonuses(session: AuthSession) -> Result<HttpResponse, PortalError> {
    catalog::list::<Bonus>(&session).await
}

#[utoipa::path(
    post,
    path = "/api/bonus",
    request_body = BonusForm,
    responses(
        (status = 201, body = Bonus),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn create_bonus(
    session: AuthSession,
    form: web::Json<BonusForm>,
) -> Result<HttpResponse, PortalError> {
    catalog::create::<Bonus, _>(&session, form.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/api/bonus/{id}",
    params(("id" = u64, Path, description = "Bonus id")),
    request_body = BonusForm,
    responses(
        (status = 200, body = Bonus),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn update_bonus(
    session: AuthSession,
    path: web::Path<u64>,
    form: web::Json<BonusForm>,
) -> Result<HttpResponse, PortalError> {
    catalog::update::<Bonus, _>(&session, path.into_inner(), form.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/api/bonus/{id}",
    params(("id" = u64, Path, description = "Bonus id")),
    responses((status = 202, description = "Awaiting confirmation", body = PendingConfirmation)),
    security(("session_cookie" = [])),
    tag = "Catalog"
)]
pub async fn delete_bonus(
    session: AuthSession,
    path: web::Path<u64>,
    gate: web::Data<ConfirmationGate>,
    notices: web::Data<NotificationCenter>,
) -> HttpResponse {
    catalog::delete::<Bonus>(&session, &gate, &notices, path.into_inner())
}
