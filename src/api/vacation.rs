use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::session::AuthSession;
use crate::client::vacation::NewVacation;
use crate::confirm::{ConfirmationGate, PendingConfirmation, confirm_then};
use crate::error::PortalError;
use crate::model::vacation::{VacationApplication, VacationBalance, has_pending_request};
use crate::notify::NotificationCenter;
use crate::utils::de;

#[derive(Debug, Deserialize, ToSchema)]
pub struct VacationRequestForm {
    #[serde(default, deserialize_with = "de::opt_u64_lenient")]
    #[schema(example = 5)]
    pub total_days: Option<u64>,
}

/// Requested days must be at least one and no more than the balance.
pub fn check_requested_days(requested: Option<u64>, available: u32) -> Result<u32, PortalError> {
    let days = requested.unwrap_or(0);
    if days < 1 {
        return Err(PortalError::field("total_days", "Debes solicitar al menos 1 día"));
    }
    match u32::try_from(days) {
        Ok(days) if days <= available => Ok(days),
        _ => Err(PortalError::field(
            "total_days",
            format!("No puedes solicitar más de {} días", available),
        )),
    }
}

/// Admins see every request; employees only their own.
#[utoipa::path(
    get,
    path = "/api/vacations",
    responses((status = 200, body = [VacationApplication])),
    security(("session_cookie" = [])),
    tag = "Vacations"
)]
pub async fn list_vacations(session: AuthSession) -> Result<HttpResponse, PortalError> {
    let applications = if session.is_admin() {
        session.client().list_vacations().await?
    } else {
        let employee_id = session.require_employee()?;
        session.client().vacations_for_employee(employee_id).await?
    };
    Ok(HttpResponse::Ok().json(applications))
}

#[utoipa::path(
    post,
    path = "/api/vacations",
    request_body = VacationRequestForm,
    responses(
        (status = 201, description = "Request created"),
        (status = 403, description = "Only employees request vacations"),
        (status = 422, description = "Invalid day count or a request is already pending")
    ),
    security(("session_cookie" = [])),
    tag = "Vacations"
)]
pub async fn request_vacation(
    session: AuthSession,
    form: web::Json<VacationRequestForm>,
) -> Result<HttpResponse, PortalError> {
    let employee_id = session.require_employee()?;
    let client = session.client();

    let existing = client.vacations_for_employee(employee_id).await?;
    if has_pending_request(&existing) {
        return Err(PortalError::field(
            "total_days",
            "Ya tienes una solicitud pendiente",
        ));
    }

    let balance = client.vacation_balance(employee_id).await?;
    let days = check_requested_days(form.total_days, balance.available_days)?;

    let created = client
        .create_vacation(&NewVacation::pending(employee_id, days))
        .await?;
    info!(employee_id, days, vacation_id = created.id, "Vacation requested");
    Ok(HttpResponse::Created().json(json!({
        "message": "Solicitud creada exitosamente",
        "data": created
    })))
}

#[utoipa::path(
    get,
    path = "/api/vacations/balance",
    responses((status = 200, body = VacationBalance)),
    security(("session_cookie" = [])),
    tag = "Vacations"
)]
pub async fn balance(session: AuthSession) -> Result<HttpResponse, PortalError> {
    let employee_id = session.require_employee()?;
    let balance = session.client().vacation_balance(employee_id).await?;
    Ok(HttpResponse::Ok().json(balance))
}

/// Runs the periodic accrual for every employee.
#[utoipa::path(
    post,
    path = "/api/vacations/accrue",
    responses((status = 200, description = "Days added"), (status = 403)),
    security(("session_cookie" = [])),
    tag = "Vacations"
)]
pub async fn accrue(session: AuthSession) -> Result<HttpResponse, PortalError> {
    session.require_admin()?;
    session.client().accrue_vacations().await?;
    info!(by = session.user().id, "Vacation days accrued");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Vacaciones agregadas exitosamente a todos los empleados"
    })))
}

#[utoipa::path(
    put,
    path = "/api/vacations/{id}/approve",
    params(("id" = u64, Path, description = "Vacation request id")),
    responses((status = 200, description = "Request approved"), (status = 403)),
    security(("session_cookie" = [])),
    tag = "Vacations"
)]
pub async fn approve(
    session: AuthSession,
    path: web::Path<u64>,
) -> Result<HttpResponse, PortalError> {
    session.require_admin()?;
    let vacation_id = path.into_inner();
    session.client().approve_vacation(vacation_id).await?;
    info!(vacation_id, by = session.user().id, "Vacation approved");
    Ok(HttpResponse::Ok().json(json!({ "message": "Solicitud aprobada exitosamente" })))
}

#[utoipa::path(
    put,
    path = "/api/vacations/{id}/decline",
    params(("id" = u64, Path, description = "Vacation request id")),
    responses(
        (status = 202, description = "Awaiting confirmation", body = PendingConfirmation),
        (status = 403)
    ),
    security(("session_cookie" = [])),
    tag = "Vacations"
)]
pub async fn decline(
    session: AuthSession,
    path: web::Path<u64>,
    gate: web::Data<ConfirmationGate>,
    notices: web::Data<NotificationCenter>,
) -> Result<HttpResponse, PortalError> {
    session.require_admin()?;
    let vacation_id = path.into_inner();
    let client = session.client().clone();

    let pending = confirm_then(
        gate.get_ref(),
        &notices,
        session.context().id(),
        "¿Estás seguro de rechazar esta solicitud?",
        move || async move {
            client.decline_vacation(vacation_id).await?;
            info!(vacation_id, "Vacation declined");
            Ok("Solicitud rechazada exitosamente".to_string())
        },
    );
    Ok(HttpResponse::Accepted().json(pending))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::api::testing::{Harness, build_app, request};
    use crate::notify::{Notice, NoticeKind};
    use actix_web::cookie::Cookie;
    use actix_web::http::{Method, StatusCode};
    use actix_web::HttpResponse as Resp;
    use serde_json::Value;
    use uuid::Uuid;

    #[test]
    fn requested_days_are_bounded_by_balance() {
        assert_eq!(check_requested_days(Some(10), 10).unwrap(), 10);

        let Err(PortalError::Validation(fields)) = check_requested_days(Some(11), 10) else {
            panic!("expected validation error");
        };
        assert_eq!(fields["total_days"], "No puedes solicitar más de 10 días");

        let Err(PortalError::Validation(fields)) = check_requested_days(None, 10) else {
            panic!("expected validation error");
        };
        assert_eq!(fields["total_days"], "Debes solicitar al menos 1 día");
        assert!(check_requested_days(Some(0), 10).is_err());
    }

    fn application(id: u64, status: &str) -> Value {
        json!({ "id": id, "employee_id": 4, "total_days": 3, "status": status })
    }

    #[actix_web::test]
    async fn pending_request_blocks_a_new_one() {
        let h = Harness::start(|cfg| {
            cfg.route(
                "/vacation/employee/{id}",
                web::get().to(|| async {
                    Resp::Ok().json(json!({ "data": [application(1, "aprobado"), application(2, "pendiente")] }))
                }),
            )
            .route(
                "/vacation",
                web::post().to(|| async { Resp::InternalServerError().finish() }),
            );
        })
        .await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(2).await;

        let req = request(Method::POST, "/api/vacations", Some(&cookie))
            .set_json(json!({ "total_days": 2 }))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn request_is_created_pending() {
        let h = Harness::start(|cfg| {
            cfg.route(
                "/vacation/employee/{id}",
                web::get().to(|| async { Resp::Ok().json(json!({ "data": [] })) }),
            )
            .route(
                "/vacation/balance/{id}",
                web::get().to(|| async { Resp::Ok().json(json!({ "data": { "available_days": 10 } })) }),
            )
            .route(
                "/vacation",
                web::post().to(|body: web::Json<Value>| async move {
                    assert_eq!(*body, json!({ "employee_id": 4, "total_days": 5, "status": 1 }));
                    Resp::Ok().json(json!({ "data": application(7, "pendiente") }))
                }),
            );
        })
        .await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(2).await;

        let req = request(Method::POST, "/api/vacations", Some(&cookie))
            .set_json(json!({ "total_days": "5" }))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(body["message"], "Solicitud creada exitosamente");
    }

    #[actix_web::test]
    async fn admins_cannot_request_vacations() {
        let h = Harness::start(|_| {}).await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(1).await;

        let req = request(Method::POST, "/api/vacations", Some(&cookie))
            .set_json(json!({ "total_days": 1 }))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    fn counting_backend(calls: Arc<AtomicUsize>) -> impl Fn(&mut web::ServiceConfig) + Send + Clone + 'static {
        move |cfg: &mut web::ServiceConfig| {
            let calls = calls.clone();
            cfg.route(
                "/vacation/decline/{id}",
                web::put().to(move || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Resp::Ok().json(json!({ "message": "ok" }))
                    }
                }),
            );
        }
    }

    async fn wait_for_notice(h: &Harness, cookie: &Cookie<'static>) -> Vec<Notice> {
        let session_id = Uuid::parse_str(cookie.value()).unwrap();
        for _ in 0..50 {
            let notices = h.notices.drain(session_id).await;
            if !notices.is_empty() {
                return notices;
            }
            actix_web::rt::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("no notification arrived");
    }

    async fn decline_and_answer(confirmed: bool) -> (usize, Vec<Notice>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let h = Harness::start(counting_backend(calls.clone())).await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(1).await;

        let req = request(Method::PUT, "/api/vacations/7/decline", Some(&cookie)).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        let pending: Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(pending["message"], "¿Estás seguro de rechazar esta solicitud?");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let id = pending["confirmation_id"].as_str().unwrap();
        let req = request(Method::POST, &format!("/api/confirmations/{}", id), Some(&cookie))
            .set_json(json!({ "confirmed": confirmed }))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let notices = wait_for_notice(&h, &cookie).await;
        (calls.load(Ordering::SeqCst), notices)
    }

    #[actix_web::test]
    async fn confirmed_decline_calls_backend_once() {
        let (calls, notices) = decline_and_answer(true).await;
        assert_eq!(calls, 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);
        assert_eq!(notices[0].message, "Solicitud rechazada exitosamente");
    }

    #[actix_web::test]
    async fn refused_decline_never_reaches_backend() {
        let (calls, notices) = decline_and_answer(false).await;
        assert_eq!(calls, 0);
        assert_eq!(notices[0].kind, NoticeKind::Info);
    }
}
