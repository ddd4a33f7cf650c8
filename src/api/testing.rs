//! In-process portal wired to a fake backend.

use std::net::SocketAddr;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::test::TestRequest;
use actix_web::web::{self, Data};
use actix_web::{App, Error};

use crate::client::BackendClient;
use crate::client::testing::spawn_backend;
use crate::config::Config;
use crate::confirm::ConfirmationGate;
use crate::notify::NotificationCenter;
use crate::routes;
use crate::session::tests::user;
use crate::session::{SESSION_COOKIE, SessionStore};

#[derive(Clone)]
pub(crate) struct Harness {
    pub config: Config,
    pub backend: BackendClient,
    pub store: SessionStore,
    pub gate: ConfirmationGate,
    pub notices: NotificationCenter,
}

impl Harness {
    pub(crate) async fn start<F>(backend_routes: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
    {
        let base_url = spawn_backend(backend_routes).await;
        let config = Config::for_tests(&base_url);

        Self {
            backend: BackendClient::new(&config.backend_url, None).expect("backend client"),
            store: SessionStore::new(config.session_ttl),
            gate: ConfirmationGate::new(config.confirmation_ttl),
            notices: NotificationCenter::new(config.session_ttl),
            config,
        }
    }

    /// Opens a session for the standard test user with the given role.
    pub(crate) async fn sign_in(&self, role_id: u64) -> Cookie<'static> {
        let session = self.store.create("tok".to_string(), user(role_id)).await;
        Cookie::new(SESSION_COOKIE, session.id().to_string())
    }
}

/// Portal app over owned handles, so it outlives the borrow of the harness.
pub(crate) fn build_app(
    h: Harness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let config = h.config.clone();
    App::new()
        .app_data(Data::new(h.config))
        .app_data(Data::new(h.backend))
        .app_data(Data::new(h.store))
        .app_data(Data::new(h.gate))
        .app_data(Data::new(h.notices))
        .configure(move |cfg| routes::configure(cfg, config))
}

/// Test request with a peer address, which the rate limiter keys on.
pub(crate) fn request(method: Method, path: &str, cookie: Option<&Cookie<'static>>) -> TestRequest {
    let peer: SocketAddr = "127.0.0.1:40000".parse().expect("peer address");
    let req = TestRequest::default()
        .method(method)
        .uri(path)
        .peer_addr(peer);

    match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}
