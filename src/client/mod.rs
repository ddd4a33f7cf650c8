//! HTTP client for the payroll backend.
//!
//! [`BackendClient`] is shared by the whole application; [`SessionClient`]
//! binds it to one session so every call carries that session's bearer token
//! and a rejected token ends the session in one place.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Envelope, LoginData, LoginReqDto};
use crate::session::{SessionContext, SessionStore};

pub mod catalog;
pub mod payroll;
pub mod performance;
pub mod report;
pub mod users;
pub mod vacation;

/// Backend paths that never carry a bearer token.
const PUBLIC_PATHS: &[&str] = &["/login", "/register", "/forgot-password"];

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network, DNS, TLS or timeout failure.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the session token. `first` is set for the one
    /// request that actually cleared the session.
    #[error("Backend rejected the session token")]
    Unauthorized { first: bool },

    #[error("Backend error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Invalid backend payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// `base_url` is the API root, e.g. `http://localhost/api`. No timeout
    /// unless one is given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn is_public(path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        PUBLIC_PATHS.contains(&path)
    }

    /// `POST /login`. A 401 here means bad credentials, not an expired
    /// session, so it surfaces as a plain status error.
    pub async fn login(&self, credentials: &LoginReqDto) -> Result<LoginData, ApiError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(credentials)
            .send()
            .await?;

        let envelope: Envelope<LoginData> = parse(response).await?;
        Ok(envelope.data)
    }

    /// Absolute URL of a backend resource with query parameters, for
    /// downloads the browser opens directly.
    pub fn link<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<String, ApiError> {
        let request = self.http.get(self.url(path)).query(query).build()?;
        Ok(request.url().to_string())
    }

    pub fn for_session(&self, session: Arc<SessionContext>, store: SessionStore) -> SessionClient {
        SessionClient {
            backend: self.clone(),
            session,
            store,
        }
    }
}

/// Backend client bound to one session.
#[derive(Clone)]
pub struct SessionClient {
    backend: BackendClient,
    session: Arc<SessionContext>,
    store: SessionStore,
}

impl SessionClient {
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.backend.http.request(method, self.backend.url(path));
        if BackendClient::is_public(path) {
            builder
        } else {
            builder.bearer_auth(self.session.token())
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let first = self.store.end(&self.session.id()).await;
            if first {
                warn!(
                    session_id = %self.session.id(),
                    url = %response.url(),
                    "Backend rejected token, session cleared"
                );
            }
            return Err(ApiError::Unauthorized { first });
        }

        parse(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::POST, path)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::PUT, path)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::DELETE, path)).await
    }
}

/// Decodes a success body, or turns a failure status into
/// [`ApiError::Status`] carrying the backend's `message`.
async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = error_message(&body, status);
        debug!(status = status.as_u16(), %url, %message, "Backend returned an error");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    if body.is_empty() {
        return Ok(serde_json::from_value(Value::Object(Default::default()))?);
    }

    Ok(serde_json::from_slice(&body)?)
}

fn error_message(body: &[u8], status: StatusCode) -> String {
    let from_json = serde_json::from_slice::<Value>(body).ok().and_then(|v| {
        v.get("message")
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    from_json.unwrap_or_else(|| {
        let text = String::from_utf8_lossy(body).trim().to_string();
        if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            text
        }
    })
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::{HttpRequest, HttpResponse, web};
    use serde_json::json;

    use super::testing::spawn_backend;
    use super::*;
    use crate::models::Ack;
    use crate::session::tests::user;

    fn bearer(req: &HttpRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
    }

    #[test]
    fn public_paths_are_exact() {
        assert!(BackendClient::is_public("/login"));
        assert!(BackendClient::is_public("/register"));
        assert!(BackendClient::is_public("/forgot-password?x=1"));
        assert!(!BackendClient::is_public("/logout"));
        assert!(!BackendClient::is_public("/user/login"));
    }

    #[test]
    fn error_message_prefers_backend_message() {
        assert_eq!(
            error_message(br#"{"message":"Nombre duplicado"}"#, StatusCode::CONFLICT),
            "Nombre duplicado"
        );
        assert_eq!(error_message(b"boom", StatusCode::INTERNAL_SERVER_ERROR), "boom");
        assert_eq!(error_message(b"", StatusCode::NOT_FOUND), "Not Found");
    }

    #[test]
    fn link_encodes_query() {
        let client = BackendClient::new("http://backend/api/", None).unwrap();
        let url = client
            .link("/reports/export", &[("period_start", "2025-01-01"), ("employee_id", "4")])
            .unwrap();
        assert_eq!(
            url,
            "http://backend/api/reports/export?period_start=2025-01-01&employee_id=4"
        );
    }

    #[actix_web::test]
    async fn login_skips_bearer_and_unwraps_envelope() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/login",
                web::post().to(|req: HttpRequest| async move {
                    assert!(bearer(&req).is_none());
                    HttpResponse::Ok().json(json!({
                        "data": {
                            "token": "abc",
                            "user": {
                                "id": 1, "username": "admin", "name": "Ana", "last_name": "López",
                                "email": "admin@empresa.com", "role_id": 1, "is_active": 1
                            }
                        }
                    }))
                }),
            );
        })
        .await;

        let client = BackendClient::new(&base, None).unwrap();
        let data = client
            .login(&LoginReqDto {
                email: "admin@empresa.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(data.token, "abc");
        assert_eq!(data.user.role_id, 1);
    }

    #[actix_web::test]
    async fn bad_credentials_do_not_look_like_expired_sessions() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/login",
                web::post().to(|| async {
                    HttpResponse::Unauthorized().json(json!({ "message": "Credenciales inválidas" }))
                }),
            );
        })
        .await;

        let client = BackendClient::new(&base, None).unwrap();
        let err = client
            .login(&LoginReqDto {
                email: "a@b.co".into(),
                password: "x".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 401, ref message } if message == "Credenciales inválidas"));
    }

    #[actix_web::test]
    async fn session_calls_carry_the_bearer_token() {
        let base = spawn_backend(|cfg| {
            cfg.route(
                "/bonus",
                web::get().to(|req: HttpRequest| async move {
                    assert_eq!(bearer(&req).as_deref(), Some("Bearer tok-1"));
                    HttpResponse::Ok().json(json!({ "data": [] }))
                }),
            );
        })
        .await;

        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create("tok-1".into(), user(1)).await;
        let client = BackendClient::new(&base, None)
            .unwrap()
            .for_session(session, store);

        let envelope: Envelope<Vec<Value>> = client.get("/bonus").await.unwrap();
        assert!(envelope.data.is_empty());
    }

    #[actix_web::test]
    async fn concurrent_401s_clear_the_session_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = spawn_backend(move |cfg| {
            cfg.app_data(web::Data::from(counter.clone())).route(
                "/payroll",
                web::get().to(|hits: web::Data<AtomicUsize>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    HttpResponse::Unauthorized().finish()
                }),
            );
        })
        .await;

        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create("stale".into(), user(1)).await;
        let id = session.id();
        let client = BackendClient::new(&base, None)
            .unwrap()
            .for_session(session, store.clone());

        let calls = (0..8).map(|_| {
            let client = client.clone();
            async move { client.get::<Ack>("/payroll").await }
        });
        let results = futures::future::join_all(calls).await;

        let firsts = results
            .iter()
            .filter(|r| matches!(r, Err(ApiError::Unauthorized { first: true })))
            .count();
        assert_eq!(firsts, 1);
        assert!(results
            .iter()
            .all(|r| matches!(r, Err(ApiError::Unauthorized { .. }))));
        assert_eq!(hits.load(Ordering::SeqCst), 8);
        assert!(store.get(&id).await.is_none());
    }

    #[actix_web::test]
    async fn empty_success_body_decodes_as_ack() {
        let base = spawn_backend(|cfg| {
            cfg.route("/logout", web::post().to(|| async { HttpResponse::NoContent().finish() }));
        })
        .await;

        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create("tok".into(), user(2)).await;
        let client = BackendClient::new(&base, None)
            .unwrap()
            .for_session(session, store);

        let ack: Ack = client.post_empty("/logout").await.unwrap();
        assert!(ack.message.is_none());
    }
}
