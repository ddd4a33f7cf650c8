use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    error::ErrorInternalServerError,
    web::Data,
};
use tracing::{debug, warn};

use crate::auth::policy::DEFAULT_POLICY;
use crate::auth::session::AuthSession;
use crate::client::BackendClient;
use crate::config::Config;
use crate::error::{LOGIN_VIEW, see_other};
use crate::session::{SESSION_COOKIE, SessionStore};

/// Where a signed-in user lands when a view is off limits for their role.
pub const DENIED_VIEW: &str = "/dashboard";

/// Resolves the session cookie and enforces the access policy for every
/// protected route. No session redirects to the login view; a denied route
/// redirects to the dashboard.
pub async fn session_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| ErrorInternalServerError("App config missing"))?
        .clone();
    let store = req
        .app_data::<Data<SessionStore>>()
        .ok_or_else(|| ErrorInternalServerError("Session store missing"))?
        .clone();
    let backend = req
        .app_data::<Data<BackendClient>>()
        .ok_or_else(|| ErrorInternalServerError("Backend client missing"))?
        .clone();

    let session = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => store.from_cookie(cookie.value()).await,
        None => None,
    };

    let Some(session) = session else {
        debug!(path = %req.path(), "No session, redirecting to login");
        return Ok(req.into_response(see_other(LOGIN_VIEW).map_into_boxed_body()));
    };

    let path = req.path();
    let route = path.strip_prefix(config.api_prefix.as_str()).unwrap_or(path);
    let allowed = DEFAULT_POLICY.can_access_role_id(route, session.user().role_id);

    if !allowed {
        warn!(
            session_id = %session.id(),
            role_id = session.user().role_id,
            route,
            "Route denied for role"
        );
        return Ok(req.into_response(see_other(DENIED_VIEW).map_into_boxed_body()));
    }

    let client = backend.for_session(session.clone(), store.get_ref().clone());
    req.extensions_mut().insert(AuthSession::new(session, client));

    next.call(req).await
}
