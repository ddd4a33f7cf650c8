use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpResponse, HttpServer, Responder, get};
use anyhow::Context;
use serde_json::json;

mod api;
mod auth;
mod client;
mod config;
mod confirm;
mod docs;
mod error;
mod model;
mod models;
mod notify;
mod period;
mod routes;
mod session;
mod utils;

use crate::client::BackendClient;
use crate::config::Config;
use crate::confirm::ConfirmationGate;
use crate::docs::ApiDoc;
use crate::notify::NotificationCenter;
use crate::session::SessionStore;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily("logs", "portal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(backend = %config.backend_url, "Portal starting...");

    let backend = BackendClient::new(&config.backend_url, config.backend_timeout)
        .context("failed to build the backend client")?;
    let sessions = SessionStore::new(config.session_ttl);
    let confirmations = ConfirmationGate::new(config.confirmation_ttl);
    let notices = NotificationCenter::new(config.session_ttl);

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        let routes_config = config.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(backend.clone()))
            .app_data(Data::new(sessions.clone()))
            .app_data(Data::new(confirmations.clone()))
            .app_data(Data::new(notices.clone()))
            .service(index)
            .configure(move |cfg| routes::configure(cfg, routes_config))
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {}", server_addr))?
    .run()
    .await?;

    Ok(())
}
