use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::session::AuthSession;
use crate::confirm::{ConfirmationGate, PendingConfirmation, confirm_then};
use crate::error::{FieldErrors, PortalError};
use crate::model::role::Role;
use crate::model::user::User;
use crate::notify::NotificationCenter;
use crate::utils::forms::{EMAIL_PATTERN, not_blank};
use crate::utils::{de, forms};

/// Account fields shared by the create and edit forms.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AccountForm {
    #[validate(length(min = 3, message = "El username debe tener mínimo 3 caracteres"))]
    #[schema(example = "jperez")]
    pub username: String,

    #[validate(custom(function = "not_blank", message = "El nombre es requerido"))]
    #[schema(example = "Juan")]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "El apellido es requerido"))]
    #[schema(example = "Pérez")]
    pub last_name: String,

    #[validate(
        custom(function = "not_blank", message = "El email es requerido"),
        email(message = "Email inválido"),
        regex(path = *EMAIL_PATTERN, message = "Email inválido")
    )]
    #[schema(example = "juan.perez@empresa.com")]
    pub email: String,

    #[validate(required(message = "El rol es requerido"))]
    #[schema(example = 2)]
    pub role_id: Option<u64>,
}

/// New user; employee-role users also carry their employee record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewUserForm {
    #[serde(flatten)]
    pub account: AccountForm,

    #[serde(default, deserialize_with = "de::opt_text_lenient")]
    #[schema(example = "2547896541201")]
    pub dpi: Option<String>,

    #[serde(default, deserialize_with = "de::opt_text_lenient")]
    #[schema(example = "84512369")]
    pub nit: Option<String>,

    #[serde(default)]
    pub position: Option<String>,

    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    #[schema(example = 6500.0)]
    pub salary: Option<f64>,

    #[serde(default, deserialize_with = "de::opt_date_lenient")]
    #[schema(value_type = Option<String>, format = "date")]
    pub hire_date: Option<NaiveDate>,

    #[serde(default)]
    pub contract_type_id: Option<u64>,
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Employee record rules shared by user creation and employee edits.
pub fn employee_field_errors(
    dpi: &Option<String>,
    nit: &Option<String>,
    salary: Option<f64>,
    contract_type_id: Option<u64>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if blank(dpi) {
        errors.insert("dpi".into(), "El DPI es requerido".into());
    }
    if blank(nit) {
        errors.insert("nit".into(), "El NIT es requerido".into());
    }
    match salary {
        None => {
            errors.insert("salary".into(), "El salario es requerido".into());
        }
        Some(s) if s <= 0.0 => {
            errors.insert("salary".into(), "El salario debe ser mayor a 0".into());
        }
        Some(_) => {}
    }
    if contract_type_id.is_none() {
        errors.insert(
            "contract_type_id".into(),
            "El tipo de contrato es requerido".into(),
        );
    }
    errors
}

impl NewUserForm {
    pub fn check(&self) -> Result<(), PortalError> {
        let is_employee = self.account.role_id.and_then(Role::from_id) == Some(Role::Employee);

        let mut extra = FieldErrors::new();
        if is_employee {
            extra = employee_field_errors(&self.dpi, &self.nit, self.salary, self.contract_type_id);
            if self.hire_date.is_none() {
                extra.insert(
                    "hire_date".into(),
                    "La fecha de contratación es requerida".into(),
                );
            }
        }

        forms::merge(self.account.validate(), extra)
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, body = [User])),
    security(("session_cookie" = [])),
    tag = "Users"
)]
pub async fn list_users(session: AuthSession) -> Result<HttpResponse, PortalError> {
    let users = session.client().list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUserForm,
    responses(
        (status = 201, body = User),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Users"
)]
pub async fn create_user(
    session: AuthSession,
    form: web::Json<NewUserForm>,
) -> Result<HttpResponse, PortalError> {
    form.check()?;
    let user = session.client().register_user(&form.into_inner()).await?;
    info!(created_user_id = user.id, by = session.user().id, "User registered");
    Ok(HttpResponse::Created().json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = u64, Path, description = "User id")),
    request_body = AccountForm,
    responses(
        (status = 200, body = User),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Users"
)]
pub async fn update_user(
    session: AuthSession,
    path: web::Path<u64>,
    form: web::Json<AccountForm>,
) -> Result<HttpResponse, PortalError> {
    let form = forms::validated(form.into_inner())?;
    let user = session.client().update_user(path.into_inner(), &form).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Deactivation waits for confirmation; the outcome arrives as a
/// notification.
#[utoipa::path(
    put,
    path = "/api/users/{id}/deactivate",
    params(("id" = u64, Path, description = "User id")),
    responses((status = 202, description = "Awaiting confirmation", body = PendingConfirmation)),
    security(("session_cookie" = [])),
    tag = "Users"
)]
pub async fn deactivate_user(
    session: AuthSession,
    path: web::Path<u64>,
    gate: web::Data<ConfirmationGate>,
    notices: web::Data<NotificationCenter>,
) -> HttpResponse {
    let user_id = path.into_inner();
    let client = session.client().clone();

    let pending = confirm_then(
        gate.get_ref(),
        &notices,
        session.context().id(),
        "¿Estás seguro de dar de baja a este usuario?",
        move || async move {
            client.deactivate_user(user_id).await?;
            info!(user_id, "User deactivated");
            Ok("Usuario dado de baja exitosamente".to_string())
        },
    );
    HttpResponse::Accepted().json(pending)
}
