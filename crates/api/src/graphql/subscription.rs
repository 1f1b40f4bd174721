use async_graphql::{Context, Result, Subscription};
use futures::Stream;
use quill_core::types::DbId;
use quill_db::models::comment::CommentDetail;
use quill_events::BlogEvent;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use super::types::CommentObject;
use crate::state::AppState;

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Comments added to `article_id` from now on.
    async fn on_comment_added(
        &self,
        ctx: &Context<'_>,
        article_id: DbId,
    ) -> Result<impl Stream<Item = CommentObject>> {
        let state = ctx.data::<AppState>()?;
        Ok(article_events(state, article_id, |event| match event {
            BlogEvent::CommentAdded { comment, .. } => Some(comment),
            _ => None,
        }))
    }

    /// Comments under `article_id` whose votes changed, with the new score.
    async fn on_vote_updated(
        &self,
        ctx: &Context<'_>,
        article_id: DbId,
    ) -> Result<impl Stream<Item = CommentObject>> {
        let state = ctx.data::<AppState>()?;
        Ok(article_events(state, article_id, |event| match event {
            BlogEvent::VoteUpdated { comment, .. } => Some(comment),
            _ => None,
        }))
    }
}

/// Stream the comments carried by bus events for one article.
///
/// A lagging subscriber skips the dropped events and keeps going.
fn article_events(
    state: &AppState,
    article_id: DbId,
    select: fn(BlogEvent) -> Option<CommentDetail>,
) -> impl Stream<Item = CommentObject> {
    BroadcastStream::new(state.event_bus.subscribe()).filter_map(move |received| match received {
        Ok(event) if event.article_id() == article_id => select(event).map(CommentObject::from),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(article_id, error = %err, "Subscriber lagged, events dropped");
            None
        }
    })
}
