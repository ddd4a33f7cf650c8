use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Oldest notices are dropped past this many per session.
const MAX_PER_SESSION: usize = 20;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Notice {
    pub kind: NoticeKind,
    #[schema(example = "Bonificación eliminada")]
    pub message: String,
    #[schema(value_type = String, format = "date-time")]
    pub at: DateTime<Utc>,
}

type Feed = Arc<Mutex<VecDeque<Notice>>>;

/// Per-session toast feed for outcomes that finish after the request that
/// started them.
#[derive(Clone)]
pub struct NotificationCenter {
    feeds: Cache<Uuid, Feed>,
}

impl NotificationCenter {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            feeds: Cache::builder()
                .max_capacity(100_000)
                .time_to_idle(idle_ttl)
                .build(),
        }
    }

    pub async fn push(&self, session_id: Uuid, kind: NoticeKind, message: impl Into<String>) {
        let feed = self
            .feeds
            .get_with(session_id, async { Feed::default() })
            .await;

        if let Ok(mut queue) = feed.lock() {
            if queue.len() == MAX_PER_SESSION {
                queue.pop_front();
            }
            queue.push_back(Notice {
                kind,
                message: message.into(),
                at: Utc::now(),
            });
        }
    }

    /// Returns and clears everything queued for the session, oldest first.
    pub async fn drain(&self, session_id: Uuid) -> Vec<Notice> {
        match self.feeds.get(&session_id).await {
            Some(feed) => feed
                .lock()
                .map(|mut queue| queue.drain(..).collect())
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub async fn forget(&self, session_id: Uuid) {
        self.feeds.invalidate(&session_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn drain_returns_in_order_then_empties() {
        let center = NotificationCenter::new(Duration::from_secs(60));
        let session = Uuid::new_v4();

        center.push(session, NoticeKind::Success, "uno").await;
        center.push(session, NoticeKind::Error, "dos").await;

        let notices = center.drain(session).await;
        let messages: Vec<&str> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["uno", "dos"]);
        assert_eq!(notices[1].kind, NoticeKind::Error);
        assert!(center.drain(session).await.is_empty());
    }

    #[actix_web::test]
    async fn feeds_are_per_session_and_bounded() {
        let center = NotificationCenter::new(Duration::from_secs(60));
        let mine = Uuid::new_v4();
        let other = Uuid::new_v4();

        for i in 0..(MAX_PER_SESSION + 5) {
            center.push(mine, NoticeKind::Info, format!("n{}", i)).await;
        }

        assert!(center.drain(other).await.is_empty());
        let notices = center.drain(mine).await;
        assert_eq!(notices.len(), MAX_PER_SESSION);
        assert_eq!(notices[0].message, "n5");
    }
}
