//! Comment vote entity.

use quill_core::types::DbId;
use quill_core::vote::VoteValue;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `votes` table. `value` is always `1` or `-1`
/// (enforced by a `CHECK` constraint).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: DbId,
    pub value: i64,
    pub ip_address: String,
    pub comment_id: DbId,
}

impl Vote {
    /// The stored value as a typed vote direction.
    ///
    /// Returns `None` only if the row violates the table's `CHECK`
    /// constraint.
    pub fn direction(&self) -> Option<VoteValue> {
        VoteValue::try_from(self.value).ok()
    }
}
