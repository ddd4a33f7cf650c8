use actix_web::{HttpResponse, web};

use crate::auth::session::AuthSession;
use crate::notify::{Notice, NotificationCenter};

#[utoipa::path(
    get,
    path = "/api/notifications",
    responses((status = 200, description = "Pending notices, oldest first", body = [Notice])),
    security(("session_cookie" = [])),
    tag = "Notifications"
)]
pub async fn drain(session: AuthSession, notices: web::Data<NotificationCenter>) -> HttpResponse {
    HttpResponse::Ok().json(notices.drain(session.context().id()).await)
}
