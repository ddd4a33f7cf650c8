//! Confirmation gate for destructive actions.
//!
//! A handler asks for confirmation and answers `202 Accepted` right away; the
//! action itself waits on the decision and runs only when the same session
//! later posts `{ "confirmed": true }`. Declined, expired and unknown
//! confirmations never run the action.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::rt::time::timeout;
use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::PortalError;
use crate::notify::{NoticeKind, NotificationCenter};

#[derive(Debug, Clone)]
pub struct ConfirmRequest {
    pub id: Uuid,
    pub session_id: Uuid,
    pub message: String,
}

impl ConfirmRequest {
    pub fn new(session_id: Uuid, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            message: message.into(),
        }
    }
}

pub trait Confirm {
    /// Registers the prompt. The future resolves `true` only on an explicit
    /// yes; a no, a timeout or a dropped prompt resolve `false`.
    fn ask(&self, request: ConfirmRequest) -> BoxFuture<'static, bool>;
}

type Slot = Arc<Mutex<Option<oneshot::Sender<bool>>>>;

#[derive(Clone)]
pub struct ConfirmationGate {
    pending: Cache<(Uuid, Uuid), Slot>,
    ttl: Duration,
}

impl ConfirmationGate {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
            ttl,
        }
    }

    /// Delivers the user's answer. Returns `false` when the confirmation is
    /// unknown, expired, already answered or belongs to another session.
    pub fn answer(&self, session_id: Uuid, id: Uuid, confirmed: bool) -> bool {
        let Some(slot) = self.pending.remove(&(session_id, id)) else {
            debug!(%session_id, confirmation_id = %id, "No pending confirmation");
            return false;
        };

        let sender = slot.lock().ok().and_then(|mut s| s.take());
        match sender {
            Some(tx) => tx.send(confirmed).is_ok(),
            None => false,
        }
    }
}

impl Confirm for ConfirmationGate {
    fn ask(&self, request: ConfirmRequest) -> BoxFuture<'static, bool> {
        let (tx, rx) = oneshot::channel();
        let key = (request.session_id, request.id);
        self.pending.insert(key, Arc::new(Mutex::new(Some(tx))));

        let pending = self.pending.clone();
        let ttl = self.ttl;
        async move {
            let confirmed = matches!(timeout(ttl, rx).await, Ok(Ok(true)));
            pending.invalidate(&key);
            confirmed
        }
        .boxed()
    }
}

/// Body of a `202 Accepted` answer to a destructive request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PendingConfirmation {
    #[schema(value_type = String, format = "uuid")]
    pub confirmation_id: Uuid,
    #[schema(example = "¿Está seguro de eliminar esta bonificación?")]
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmationAnswer {
    pub confirmed: bool,
}

/// Asks for confirmation and, in the background, runs `action` once the
/// answer is yes. The outcome lands in the session's notification feed.
pub fn confirm_then<C, F, Fut>(
    gate: &C,
    notices: &NotificationCenter,
    session_id: Uuid,
    prompt: impl Into<String>,
    action: F,
) -> PendingConfirmation
where
    C: Confirm,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<String, PortalError>> + 'static,
{
    let request = ConfirmRequest::new(session_id, prompt);
    let pending = PendingConfirmation {
        confirmation_id: request.id,
        message: request.message.clone(),
    };

    let decision = gate.ask(request);
    let notices = notices.clone();
    let confirmation_id = pending.confirmation_id;

    actix_web::rt::spawn(async move {
        if !decision.await {
            info!(%session_id, %confirmation_id, "Action not confirmed");
            notices
                .push(session_id, NoticeKind::Info, "Operación cancelada")
                .await;
            return;
        }

        match action().await {
            Ok(message) => notices.push(session_id, NoticeKind::Success, message).await,
            Err(e) => {
                warn!(%session_id, %confirmation_id, error = %e, "Confirmed action failed");
                notices
                    .push(session_id, NoticeKind::Error, e.to_string())
                    .await;
            }
        }
    });

    pending
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Always(bool);

    impl Confirm for Always {
        fn ask(&self, _: ConfirmRequest) -> BoxFuture<'static, bool> {
            futures::future::ready(self.0).boxed()
        }
    }

    async fn settle() {
        actix_web::rt::time::sleep(Duration::from_millis(50)).await;
    }

    #[actix_web::test]
    async fn yes_and_no_resolve_the_prompt() {
        let gate = ConfirmationGate::new(Duration::from_secs(5));
        let session = Uuid::new_v4();

        let yes = ConfirmRequest::new(session, "¿Eliminar?");
        let yes_id = yes.id;
        let decision = gate.ask(yes);
        assert!(gate.answer(session, yes_id, true));
        assert!(decision.await);

        let no = ConfirmRequest::new(session, "¿Eliminar?");
        let no_id = no.id;
        let decision = gate.ask(no);
        assert!(gate.answer(session, no_id, false));
        assert!(!decision.await);
    }

    #[actix_web::test]
    async fn answers_are_single_use_and_session_scoped() {
        let gate = ConfirmationGate::new(Duration::from_secs(5));
        let owner = Uuid::new_v4();
        let request = ConfirmRequest::new(owner, "¿Dar de baja?");
        let id = request.id;
        let decision = gate.ask(request);

        assert!(!gate.answer(Uuid::new_v4(), id, true));
        assert!(!gate.answer(owner, Uuid::new_v4(), true));
        assert!(gate.answer(owner, id, true));
        assert!(!gate.answer(owner, id, true));
        assert!(decision.await);
    }

    #[actix_web::test]
    async fn unanswered_prompt_expires_as_no() {
        let gate = ConfirmationGate::new(Duration::from_millis(20));
        let session = Uuid::new_v4();
        let request = ConfirmRequest::new(session, "¿Rechazar?");
        let id = request.id;

        assert!(!gate.ask(request).await);
        assert!(!gate.answer(session, id, true));
    }

    #[actix_web::test]
    async fn confirmed_action_runs_once_and_reports_success() {
        let notices = NotificationCenter::new(Duration::from_secs(60));
        let session = Uuid::new_v4();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        confirm_then(&Always(true), &notices, session, "¿Eliminar?", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok("Bonificación eliminada".to_string())
        });
        settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        let feed = notices.drain(session).await;
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, NoticeKind::Success);
        assert_eq!(feed[0].message, "Bonificación eliminada");
    }

    #[actix_web::test]
    async fn declined_action_never_runs() {
        let notices = NotificationCenter::new(Duration::from_secs(60));
        let session = Uuid::new_v4();
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        confirm_then(&Always(false), &notices, session, "¿Eliminar?", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(String::new())
        });
        settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
        let feed = notices.drain(session).await;
        assert_eq!(feed[0].kind, NoticeKind::Info);
    }

    #[actix_web::test]
    async fn failed_action_reports_error() {
        let notices = NotificationCenter::new(Duration::from_secs(60));
        let session = Uuid::new_v4();

        confirm_then(&Always(true), &notices, session, "¿Eliminar?", || async {
            Err(PortalError::Backend {
                status: 409,
                message: "La bonificación está en uso".into(),
            })
        });
        settle().await;

        let feed = notices.drain(session).await;
        assert_eq!(feed[0].kind, NoticeKind::Error);
        assert_eq!(feed[0].message, "La bonificación está en uso");
    }
}
