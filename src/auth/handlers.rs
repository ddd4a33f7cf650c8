use actix_web::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::middleware::DENIED_VIEW;
use crate::auth::policy::{DEFAULT_POLICY, NavItem, landing_route};
use crate::auth::session::AuthSession;
use crate::client::BackendClient;
use crate::config::Config;
use crate::error::{LOGIN_VIEW, PortalError, see_other};
use crate::model::role::Role;
use crate::model::user::User;
use crate::models::{Ack, LoginReqDto};
use crate::notify::NotificationCenter;
use crate::session::{SESSION_COOKIE, SessionStore};
use crate::utils::forms::validated;

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: User,
    pub role: Option<Role>,
    /// View to open after sign-in
    #[schema(value_type = String, example = "/payrolls")]
    pub landing: &'static str,
    #[schema(value_type = String, format = "date-time")]
    pub signed_in_at: DateTime<Utc>,
}

fn session_cookie(value: String, config: &Config) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .finish()
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 303, description = "Already signed in"),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(req, body, backend, store, config),
    fields(email = %body.email)
)]
pub async fn login(
    req: HttpRequest,
    body: web::Json<LoginReqDto>,
    backend: web::Data<BackendClient>,
    store: web::Data<SessionStore>,
    config: web::Data<Config>,
) -> Result<HttpResponse, PortalError> {
    info!("Login request received");

    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        if store.from_cookie(cookie.value()).await.is_some() {
            debug!("Session already active");
            return Ok(see_other(DENIED_VIEW));
        }
    }

    let credentials = validated(body.into_inner())?;
    let data = backend.login(&credentials).await?;

    let session = store.create(data.token, data.user).await;
    let role = session.role();
    info!(user_id = session.user().id, ?role, "Login successful");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(session.id().to_string(), &config))
        .json(SessionResponse {
            user: session.user().clone(),
            role,
            landing: landing_route(role),
            signed_in_at: session.created_at(),
        }))
}

/// Ends the session locally whatever the backend answers.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Signed out")
    ),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    backend: web::Data<BackendClient>,
    store: web::Data<SessionStore>,
    notices: web::Data<NotificationCenter>,
) -> HttpResponse {
    let session = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => store.from_cookie(cookie.value()).await,
        None => None,
    };

    if let Some(session) = session {
        let id = session.id();
        let client = backend.for_session(session, store.get_ref().clone());
        if let Err(e) = client.post_empty::<Ack>("/logout").await {
            warn!(session_id = %id, error = %e, "Backend logout failed");
        }
        store.end(&id).await;
        notices.forget(id).await;
    }

    HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(json!({ "message": "Sesión cerrada", "redirect": LOGIN_VIEW }))
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, body = SessionResponse),
        (status = 303, description = "No session")
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn current_session(session: AuthSession) -> HttpResponse {
    let role = session.role();
    HttpResponse::Ok().json(SessionResponse {
        user: session.user().clone(),
        role,
        landing: landing_route(role),
        signed_in_at: session.context().created_at(),
    })
}

#[utoipa::path(
    get,
    path = "/api/navigation",
    responses(
        (status = 200, body = [NavItem])
    ),
    security(("session_cookie" = [])),
    tag = "Auth"
)]
pub async fn navigation(session: AuthSession) -> HttpResponse {
    let items = session
        .role()
        .map(|role| DEFAULT_POLICY.navigation(role))
        .unwrap_or_default();
    HttpResponse::Ok().json(items)
}

#[cfg(test)]
mod tests {
    use actix_web::http::{Method, StatusCode};
    use actix_web::{HttpResponse as Resp, web};
    use serde_json::{Value, json};

    use crate::api::testing::{Harness, build_app, request};
    use crate::session::SESSION_COOKIE;

    fn backend_user() -> Value {
        json!({
            "id": 1, "username": "admin", "name": "Ana", "last_name": "López",
            "email": "admin@empresa.com", "role_id": 1, "is_active": 1
        })
    }

    #[actix_web::test]
    async fn protected_views_need_a_session() {
        let h = Harness::start(|_| {}).await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;

        let req = request(Method::GET, "/api/payrolls", None).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("Location").unwrap(), "/auth/login");
    }

    #[actix_web::test]
    async fn login_opens_a_session_and_lands_by_role() {
        let h = Harness::start(|cfg| {
            cfg.route(
                "/login",
                web::post().to(|| async {
                    Resp::Ok().json(json!({ "data": { "token": "abc", "user": backend_user() } }))
                }),
            );
        })
        .await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;

        let req = request(Method::POST, "/auth/login", None)
            .set_json(json!({ "email": "admin@empresa.com", "password": "secret" }))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.into_owned())
            .unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        let body: Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(body["landing"], "/payrolls");

        let req = request(Method::GET, "/api/session", Some(&cookie)).to_request();
        let body: Value = actix_web::test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["user"]["username"], "admin");

        let req = request(Method::POST, "/auth/login", Some(&cookie))
            .set_json(json!({ "email": "admin@empresa.com", "password": "secret" }))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("Location").unwrap(), "/dashboard");
    }

    #[actix_web::test]
    async fn invalid_login_form_is_rejected_locally() {
        let h = Harness::start(|_| {}).await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;

        let req = request(Method::POST, "/auth/login", None)
            .set_json(json!({ "email": "no-es-correo", "password": "" }))
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(body["fields"]["email"], "Email inválido");
        assert_eq!(body["fields"]["password"], "La contraseña es requerida");
    }

    #[actix_web::test]
    async fn rejected_token_ends_session_with_redirect() {
        let h = Harness::start(|cfg| {
            cfg.route("/bonus", web::get().to(|| async { Resp::Unauthorized().finish() }));
        })
        .await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(1).await;

        let req = request(Method::GET, "/api/bonus", Some(&cookie)).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("Location").unwrap(), "/auth/login");
        let removal = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .unwrap();
        assert_eq!(removal.value(), "");

        let req = request(Method::GET, "/api/session", Some(&cookie)).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn logout_clears_the_session_even_if_backend_fails() {
        let h = Harness::start(|cfg| {
            cfg.route("/logout", web::post().to(|| async { Resp::InternalServerError().finish() }));
        })
        .await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(2).await;

        let req = request(Method::POST, "/auth/logout", Some(&cookie)).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = request(Method::GET, "/api/session", Some(&cookie)).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn navigation_follows_role() {
        let h = Harness::start(|_| {}).await;
        let app = actix_web::test::init_service(build_app(h.clone())).await;
        let cookie = h.sign_in(2).await;

        let req = request(Method::GET, "/api/navigation", Some(&cookie)).to_request();
        let body: Value = actix_web::test::call_and_read_body_json(&app, req).await;
        let routes: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["href"].as_str().unwrap())
            .collect();
        assert!(routes.contains(&"/payments"));
        assert!(!routes.contains(&"/payrolls"));
    }
}
