use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use tally_types::{EntryId, SameWeek, TimesheetEntry};

use crate::error::{StoreError, StoreResult};
use crate::traits::TimesheetStore;

/// In-memory, HashMap-based timesheet store.
///
/// All entries are held in memory behind a single `RwLock`: mutations take
/// the write lock, queries the read lock, so the store can sit behind
/// concurrent HTTP requests. Entries are cloned on the way out. State is
/// reset on restart.
pub struct InMemoryTimesheetStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<EntryId, TimesheetEntry>,
    next_id: EntryId,
}

impl Inner {
    fn has_duplicate(&self, candidate: &TimesheetEntry) -> bool {
        self.entries.values().any(|e| e.conflicts_with(candidate))
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl InMemoryTimesheetStore {
    /// Create a new empty store. Ids start at 0.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    fn read_guard(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_guard(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryTimesheetStore {
    fn default() -> Self {
        Self::new()
    }
}

fn duplicate_of(entry: &TimesheetEntry) -> StoreError {
    StoreError::Duplicate {
        user_id: entry.user_id,
        project_id: entry.project_id,
        date: entry.date.date(),
    }
}

fn matches_user_and_week(
    entry: &TimesheetEntry,
    user_id: i32,
    week: Option<NaiveDateTime>,
) -> bool {
    entry.user_id == user_id && week.map_or(true, |w| entry.date.in_same_week_as(&w))
}

impl TimesheetStore for InMemoryTimesheetStore {
    fn add(&self, entry: TimesheetEntry) -> StoreResult<EntryId> {
        let mut inner = self.write_guard()?;
        if inner.has_duplicate(&entry) {
            return Err(duplicate_of(&entry));
        }
        let id = inner.allocate_id();
        inner.entries.insert(id, entry);
        Ok(id)
    }

    fn update(&self, id: EntryId, entry: TimesheetEntry) -> StoreResult<EntryId> {
        let mut inner = self.write_guard()?;
        // The duplicate scan covers the slot being replaced as well, so
        // rewriting an entry with its own (user, project, day) triple is
        // rejected as a conflict with itself.
        if inner.has_duplicate(&entry) {
            return Err(duplicate_of(&entry));
        }
        let id = if inner.entries.contains_key(&id) {
            id
        } else {
            inner.allocate_id()
        };
        inner.entries.insert(id, entry);
        Ok(id)
    }

    fn delete(&self, id: EntryId) -> StoreResult<bool> {
        let mut inner = self.write_guard()?;
        Ok(inner.entries.remove(&id).is_some())
    }

    fn all_entries(
        &self,
        offset: i64,
        limit: i64,
    ) -> StoreResult<IndexMap<EntryId, TimesheetEntry>> {
        let inner = self.read_guard()?;
        let mut pairs: Vec<(EntryId, TimesheetEntry)> = inner
            .entries
            .iter()
            .map(|(id, entry)| (*id, entry.clone()))
            .collect();
        pairs.sort_by_key(|(_, entry)| entry.date);
        // Negative values clamp to zero rather than erroring.
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(pairs.into_iter().skip(offset).take(limit).collect())
    }

    fn entries_for_user_per_week(
        &self,
        user_id: i32,
        week: Option<NaiveDateTime>,
    ) -> StoreResult<HashMap<EntryId, TimesheetEntry>> {
        let inner = self.read_guard()?;
        Ok(inner
            .entries
            .iter()
            .filter(|(_, entry)| matches_user_and_week(entry, user_id, week))
            .map(|(id, entry)| (*id, entry.clone()))
            .collect())
    }

    fn hours_per_project(
        &self,
        user_id: i32,
        week: Option<NaiveDateTime>,
    ) -> StoreResult<HashMap<i32, f64>> {
        let inner = self.read_guard()?;
        let mut totals: HashMap<i32, f64> = HashMap::new();
        for entry in inner.entries.values() {
            if matches_user_and_week(entry, user_id, week) {
                *totals.entry(entry.project_id).or_insert(0.0) += entry.hours_worked;
            }
        }
        Ok(totals)
    }

    fn total_count(&self) -> StoreResult<usize> {
        Ok(self.read_guard()?.entries.len())
    }
}

impl std::fmt::Debug for InMemoryTimesheetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read_guard().map(|g| g.entries.len()).unwrap_or(0);
        f.debug_struct("InMemoryTimesheetStore")
            .field("entry_count", &count)
            .finish()
    }
}
