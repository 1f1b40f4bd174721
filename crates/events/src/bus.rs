//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` across the application. Services
//! publish after the state change has committed; subscribers (GraphQL
//! subscriptions) filter by article id.

use chrono::{DateTime, Utc};
use quill_core::types::DbId;
use quill_db::models::comment::CommentDetail;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// BlogEvent
// ---------------------------------------------------------------------------

/// A notification about a change under one article.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlogEvent {
    /// A comment was appended to an article.
    CommentAdded {
        article_id: DbId,
        comment: CommentDetail,
        at: DateTime<Utc>,
    },
    /// The vote set of a comment changed.
    VoteUpdated {
        article_id: DbId,
        comment: CommentDetail,
        at: DateTime<Utc>,
    },
}

impl BlogEvent {
    pub fn comment_added(comment: CommentDetail) -> Self {
        BlogEvent::CommentAdded {
            article_id: comment.comment.article_id,
            comment,
            at: Utc::now(),
        }
    }

    pub fn vote_updated(comment: CommentDetail) -> Self {
        BlogEvent::VoteUpdated {
            article_id: comment.comment.article_id,
            comment,
            at: Utc::now(),
        }
    }

    /// The article this event is scoped to.
    pub fn article_id(&self) -> DbId {
        match self {
            BlogEvent::CommentAdded { article_id, .. }
            | BlogEvent::VoteUpdated { article_id, .. } => *article_id,
        }
    }

    /// The comment carried by the event.
    pub fn comment(&self) -> &CommentDetail {
        match self {
            BlogEvent::CommentAdded { comment, .. } | BlogEvent::VoteUpdated { comment, .. } => {
                comment
            }
        }
    }

    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            BlogEvent::CommentAdded { .. } => "comment_added",
            BlogEvent::VoteUpdated { .. } => "vote_updated",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`BlogEvent`].
pub struct EventBus {
    sender: broadcast::Sender<BlogEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Delivery is best effort. With no subscribers the event is dropped.
    pub fn publish(&self, event: BlogEvent) {
        let article_id = event.article_id();
        let comment_id = event.comment().comment.id;
        let kind = event.kind();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!(article_id, comment_id, kind, receivers, "Event published");
            }
            Err(_) => {
                tracing::trace!(article_id, comment_id, kind, "Event dropped, no subscribers");
            }
        }
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<BlogEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
