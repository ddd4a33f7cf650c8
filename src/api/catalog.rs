//! Shared handlers behind the four catalog screens (bonuses, deductions,
//! contract types, payroll types).

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::session::AuthSession;
use crate::client::catalog::CatalogResource;
use crate::confirm::{ConfirmationGate, confirm_then};
use crate::error::PortalError;
use crate::notify::NotificationCenter;
use crate::utils::forms::{not_blank, validated};

/// Form for catalogs that only carry a name.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct NameForm {
    #[validate(custom(function = "not_blank", message = "El nombre es requerido"))]
    #[schema(example = "Mensual")]
    pub name: String,
}

pub async fn list<T: CatalogResource>(session: &AuthSession) -> Result<HttpResponse, PortalError> {
    let items = session.client().list_catalog::<T>().await?;
    Ok(HttpResponse::Ok().json(items))
}

pub async fn create<T, F>(session: &AuthSession, form: F) -> Result<HttpResponse, PortalError>
where
    T: CatalogResource,
    F: Validate + Serialize,
{
    let form = validated(form)?;
    let created = session.client().create_catalog::<T, _>(&form).await?;
    info!(path = T::PATH, user_id = session.user().id, "Catalog entry created");
    Ok(HttpResponse::Created().json(created))
}

pub async fn update<T, F>(session: &AuthSession, id: u64, form: F) -> Result<HttpResponse, PortalError>
where
    T: CatalogResource,
    F: Validate + Serialize,
{
    let form = validated(form)?;
    let updated = session.client().update_catalog::<T, _>(id, &form).await?;
    info!(path = T::PATH, id, user_id = session.user().id, "Catalog entry updated");
    Ok(HttpResponse::Ok().json(updated))
}

/// Deletion waits for confirmation; the outcome arrives as a notification.
pub fn delete<T: CatalogResource>(
    session: &AuthSession,
    gate: &ConfirmationGate,
    notices: &NotificationCenter,
    id: u64,
) -> HttpResponse {
    let client = session.client().clone();
    let pending = confirm_then(
        gate,
        notices,
        session.context().id(),
        T::DELETE_PROMPT,
        move || async move {
            client.delete_catalog::<T>(id).await?;
            info!(path = T::PATH, id, "Catalog entry deleted");
            Ok(T::DELETED.to_string())
        },
    );
    HttpResponse::Accepted().json(pending)
}
