use std::collections::HashMap;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use tally_types::{EntryId, TimesheetEntry};

use crate::error::StoreResult;

/// Timesheet entry store.
///
/// All implementations must satisfy these invariants:
/// - Identifiers are allocated by the store, start at 0, increase
///   monotonically, and are never reused after deletion.
/// - No two stored entries share a (user, project, calendar date) triple.
///   The check runs on add and update alike, and the update check does not
///   exempt the slot being replaced.
/// - A rejected mutation leaves the store untouched.
/// - Deleting an unknown id is a no-op, not an error.
/// - Queries never mutate.
pub trait TimesheetStore: Send + Sync {
    /// Insert a new entry under a freshly allocated id and return that id.
    ///
    /// Returns [`StoreError::Duplicate`](crate::StoreError::Duplicate) if
    /// the duplicate triple rule would be violated.
    fn add(&self, entry: TimesheetEntry) -> StoreResult<EntryId>;

    /// Replace the entry at `id`, or append under a new auto-allocated id
    /// when `id` is unknown (the supplied id is discarded). Returns the id
    /// actually written. Same duplicate rule as [`add`](Self::add).
    fn update(&self, id: EntryId, entry: TimesheetEntry) -> StoreResult<EntryId>;

    /// Remove the entry at `id` if present. Returns whether it existed.
    fn delete(&self, id: EntryId) -> StoreResult<bool>;

    /// One page of all entries, sorted ascending by date, ids preserved.
    ///
    /// A negative `offset` skips nothing; a negative `limit` yields an
    /// empty page. Neither is an error.
    fn all_entries(
        &self,
        offset: i64,
        limit: i64,
    ) -> StoreResult<IndexMap<EntryId, TimesheetEntry>>;

    /// Every entry for `user_id`; when `week` is given, only entries in the
    /// same ISO week and calendar year as that date.
    fn entries_for_user_per_week(
        &self,
        user_id: i32,
        week: Option<NaiveDateTime>,
    ) -> StoreResult<HashMap<EntryId, TimesheetEntry>>;

    /// Total hours per project for `user_id`, under the same optional week
    /// filter. Projects with no matching entries are absent, not zero.
    fn hours_per_project(
        &self,
        user_id: i32,
        week: Option<NaiveDateTime>,
    ) -> StoreResult<HashMap<i32, f64>>;

    /// Number of entries currently stored, irrespective of any filter.
    fn total_count(&self) -> StoreResult<usize>;
}
