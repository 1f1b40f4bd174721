//! Repository for the `votes` table: the comment vote ledger.
//!
//! The `uq_votes_comment_ip` index is the source of truth for "one vote per
//! (comment, ip)". [`VoteRepo::cast`] runs the read of the slot and the
//! resulting insert / flip / delete inside one `BEGIN IMMEDIATE` transaction,
//! which takes the database write lock before the read. Concurrent requests
//! for the same slot therefore apply one after another, each seeing the
//! previous one's result.

use quill_core::types::DbId;
use quill_core::vote::{VoteTransition, VoteValue};
use quill_core::voter::VoterIp;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::comment::CommentDetail;
use crate::models::vote::Vote;
use crate::repositories::CommentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, value, ip_address, comment_id";

/// Errors from the vote ledger.
#[derive(Debug, thiserror::Error)]
pub enum VoteError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Vote {vote_id} holds invalid value {value}")]
    InvalidStoredValue { vote_id: DbId, value: i64 },
}

/// Result of a successful vote: which transition was applied and the comment
/// as it stands afterwards.
#[derive(Debug, Clone)]
pub struct CastVote {
    pub transition: VoteTransition,
    pub comment: CommentDetail,
}

/// Vote ledger operations.
pub struct VoteRepo;

impl VoteRepo {
    /// Cast `value` on `comment_id` for `voter`.
    ///
    /// Returns `None` if the comment does not exist. Otherwise returns the
    /// applied transition and the comment with its current votes and score,
    /// read in the same transaction as the write.
    pub async fn cast(
        pool: &SqlitePool,
        comment_id: DbId,
        value: VoteValue,
        voter: &VoterIp,
    ) -> Result<Option<CastVote>, VoteError> {
        let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

        let parent: Option<i64> = sqlx::query_scalar("SELECT 1 FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(&mut *tx)
            .await?;
        if parent.is_none() {
            return Ok(None);
        }

        let existing = Self::find_slot(&mut tx, comment_id, voter).await?;
        let current = match &existing {
            None => None,
            Some(row) => Some(row.direction().ok_or(VoteError::InvalidStoredValue {
                vote_id: row.id,
                value: row.value,
            })?),
        };

        let transition = VoteTransition::for_request(current, value);
        match (transition, existing.map(|row| row.id)) {
            (VoteTransition::Retract, Some(vote_id)) => {
                sqlx::query("DELETE FROM votes WHERE id = $1")
                    .bind(vote_id)
                    .execute(&mut *tx)
                    .await?;
            }
            (VoteTransition::Flip(next), Some(vote_id)) => {
                sqlx::query("UPDATE votes SET value = $1 WHERE id = $2")
                    .bind(next.as_i64())
                    .bind(vote_id)
                    .execute(&mut *tx)
                    .await?;
            }
            (VoteTransition::Insert(next) | VoteTransition::Flip(next), None) => {
                sqlx::query(
                    "INSERT INTO votes (value, ip_address, comment_id) VALUES ($1, $2, $3)",
                )
                .bind(next.as_i64())
                .bind(voter.as_str())
                .bind(comment_id)
                .execute(&mut *tx)
                .await?;
            }
            (VoteTransition::Insert(_), Some(_)) | (VoteTransition::Retract, None) => {}
        }

        let comment = CommentRepo::load_detail(&mut tx, comment_id).await?;
        tx.commit().await?;

        tracing::info!(
            comment_id,
            voter = %voter,
            value = value.as_i64(),
            ?transition,
            state = ?transition.resulting_state(),
            "Vote applied"
        );

        Ok(comment.map(|comment| CastVote {
            transition,
            comment,
        }))
    }

    /// The vote currently held by `voter` on `comment_id`, if any.
    async fn find_slot(
        conn: &mut SqliteConnection,
        comment_id: DbId,
        voter: &VoterIp,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM votes WHERE comment_id = $1 AND ip_address = $2");
        sqlx::query_as::<_, Vote>(&query)
            .bind(comment_id)
            .bind(voter.as_str())
            .fetch_optional(&mut *conn)
            .await
    }
}
