//! Session ownership.
//!
//! The store is the only place sessions are created or cleared: `create` on
//! login, `end` on logout or when the backend rejects the token. Everything
//! else receives a read-only [`SessionContext`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use tracing::{debug, info};
use uuid::Uuid;

use crate::model::role::Role;
use crate::model::user::User;

pub const SESSION_COOKIE: &str = "portal_session";

const MAX_SESSIONS: u64 = 100_000;

#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    token: String,
    user: User,
    created_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Opaque backend bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Option<Role> {
        self.user.role()
    }

    pub fn employee_id(&self) -> Option<u64> {
        self.user.employee_id()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<SessionContext>>,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(idle_ttl)
                .build(),
        }
    }

    pub async fn create(&self, token: String, user: User) -> Arc<SessionContext> {
        let context = Arc::new(SessionContext {
            id: Uuid::new_v4(),
            token,
            user,
            created_at: Utc::now(),
        });

        self.sessions.insert(context.id, context.clone()).await;
        info!(session_id = %context.id, user_id = context.user.id, "Session created");
        context
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<SessionContext>> {
        self.sessions.get(id).await
    }

    /// Looks up the session named by a raw cookie value.
    pub async fn from_cookie(&self, raw: &str) -> Option<Arc<SessionContext>> {
        let id = Uuid::parse_str(raw.trim()).ok()?;
        self.get(&id).await
    }

    /// Clears a session. Returns `true` only for the caller that actually
    /// removed it, so concurrent failures agree on a single winner.
    pub async fn end(&self, id: &Uuid) -> bool {
        match self.sessions.remove(id).await {
            Some(_) => {
                info!(session_id = %id, "Session cleared");
                true
            }
            None => {
                debug!(session_id = %id, "Session already cleared");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn user(role_id: u64) -> User {
        serde_json::from_value(json!({
            "id": 9,
            "username": "jperez",
            "name": "Juan",
            "last_name": "Pérez",
            "email": "juan.perez@empresa.com",
            "role_id": role_id,
            "is_active": 1,
            "employee": {
                "id": 4,
                "user_id": 9,
                "salary": 6500,
                "contract_type_id": 3,
                "vacation_balance": { "available_days": 10 }
            }
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn create_then_lookup_by_cookie() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create("tok".to_string(), user(2)).await;

        let found = store.from_cookie(&session.id().to_string()).await.unwrap();
        assert_eq!(found.token(), "tok");
        assert_eq!(found.role(), Some(Role::Employee));
        assert_eq!(found.employee_id(), Some(4));

        assert!(store.from_cookie("not-a-uuid").await.is_none());
        assert!(store.from_cookie(&Uuid::new_v4().to_string()).await.is_none());
    }

    #[actix_web::test]
    async fn concurrent_end_has_exactly_one_winner() {
        let store = SessionStore::new(Duration::from_secs(60));
        let session = store.create("tok".to_string(), user(1)).await;
        let id = session.id();

        let attempts = (0..16).map(|_| {
            let store = store.clone();
            async move { store.end(&id).await }
        });
        let results = futures::future::join_all(attempts).await;

        assert_eq!(results.iter().filter(|won| **won).count(), 1);
        assert!(store.get(&id).await.is_none());
    }
}
