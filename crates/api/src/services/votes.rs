//! Comment voting.

use quill_core::types::DbId;
use quill_core::vote::VoteValue;
use quill_core::voter::VoterIp;
use quill_db::models::comment::CommentDetail;
use quill_db::repositories::VoteRepo;
use quill_events::BlogEvent;

use crate::error::AppResult;
use crate::state::AppState;

/// Cast `value` on a comment for `voter`.
///
/// The value is checked before storage is touched. Returns `None` when the
/// comment does not exist; otherwise the comment with its current votes and
/// score.
pub async fn cast(
    state: &AppState,
    comment_id: DbId,
    value: i64,
    voter: &VoterIp,
) -> AppResult<Option<CommentDetail>> {
    tracing::info!(comment_id, value, voter = %voter, "Processing vote");

    let value = VoteValue::try_from(value).inspect_err(|_| {
        tracing::warn!(comment_id, value, "Invalid vote value received");
    })?;

    let Some(cast) = VoteRepo::cast(&state.pool, comment_id, value, voter).await? else {
        return Ok(None);
    };

    state
        .event_bus
        .publish(BlogEvent::vote_updated(cast.comment.clone()));
    Ok(Some(cast.comment))
}
