use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::api::users::employee_field_errors;
use crate::auth::session::AuthSession;
use crate::error::PortalError;
use crate::model::employee::Employee;
use crate::utils::{de, forms};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeForm {
    #[serde(default, deserialize_with = "de::opt_text_lenient")]
    #[schema(example = "2547896541201")]
    pub dpi: Option<String>,

    #[serde(default, deserialize_with = "de::opt_text_lenient")]
    #[schema(example = "84512369")]
    pub nit: Option<String>,

    #[serde(default)]
    #[schema(example = "Analista")]
    pub position: Option<String>,

    #[serde(default, deserialize_with = "de::opt_f64_lenient")]
    #[schema(example = 7000.0)]
    pub salary: Option<f64>,

    #[serde(default)]
    #[schema(example = 3)]
    pub contract_type_id: Option<u64>,
}

/// Feeds the employee pickers of the evaluation and report screens.
#[utoipa::path(
    get,
    path = "/api/users/employees",
    responses((status = 200, body = [Employee])),
    security(("session_cookie" = [])),
    tag = "Users"
)]
pub async fn list_employees(session: AuthSession) -> Result<HttpResponse, PortalError> {
    let employees = session.client().list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

#[utoipa::path(
    get,
    path = "/api/users/employees/{id}",
    params(("id" = u64, Path, description = "Employee id")),
    responses((status = 200, body = Employee)),
    security(("session_cookie" = [])),
    tag = "Users"
)]
pub async fn get_employee(
    session: AuthSession,
    path: web::Path<u64>,
) -> Result<HttpResponse, PortalError> {
    let employee = session.client().get_employee(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    put,
    path = "/api/users/employees/{id}",
    params(("id" = u64, Path, description = "Employee id")),
    request_body = EmployeeForm,
    responses(
        (status = 200, body = Employee),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Users"
)]
pub async fn update_employee(
    session: AuthSession,
    path: web::Path<u64>,
    form: web::Json<EmployeeForm>,
) -> Result<HttpResponse, PortalError> {
    let errors = employee_field_errors(&form.dpi, &form.nit, form.salary, form.contract_type_id);
    forms::merge(Ok(()), errors)?;

    let employee_id = path.into_inner();
    let employee = session
        .client()
        .update_employee(employee_id, &form.into_inner())
        .await?;
    info!(employee_id, by = session.user().id, "Employee updated");
    Ok(HttpResponse::Ok().json(employee))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{Harness, build_app, request};
    use actix_web::HttpResponse as Resp;
    use actix_web::http::{Method, StatusCode};
    use serde_json::{Value, json};

    fn employee(id: u64) -> Value {
        json!({
            "id": id, "user_id": id + 5, "dpi": 2547896541201u64, "nit": "84512369",
            "position": "Analista", "salary": "6500.00", "hire_date": "2024-01-15",
            "is_active": 1, "contract_type_id": 3
        })
    }

    #[actix_web::test]
    async fn admin_lists_employees() {
        let h = Harness::start(|cfg| {
            cfg.route(
                "/employee",
                web::get().to(|| async {
                    Resp::Ok().json(json!({ "data": [employee(4), employee(5)] }))
                }),
            );
        })
        .await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(1).await;

        let req = request(Method::GET, "/api/users/employees", Some(&cookie)).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_web::test::read_body_json(resp).await;
        let employees = body.as_array().unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[1]["id"], 5);
        assert_eq!(employees[0]["dpi"], "2547896541201");
    }

    #[actix_web::test]
    async fn employees_cannot_list_employees() {
        let h = Harness::start(|_| {}).await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(2).await;

        let req = request(Method::GET, "/api/users/employees", Some(&cookie)).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("Location").unwrap(), "/dashboard");
    }
}
