use chrono::{Datelike, NaiveDateTime};
use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Store-assigned entry identifier.
///
/// Allocated from a counter that starts at 0 and only ever increases; an id
/// is never reused, even after the entry it named is deleted.
pub type EntryId = u32;

/// One timesheet record.
///
/// `date` keeps whatever time-of-day the caller supplied. The duplicate rule
/// and the week filter only ever look at the calendar-date part.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    pub user_id: i32,
    pub project_id: i32,
    #[serde(deserialize_with = "crate::temporal::flexible::deserialize")]
    pub date: NaiveDateTime,
    pub hours_worked: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl TimesheetEntry {
    /// Calendar year, derived from `date`.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month (1-12), derived from `date`.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Two entries conflict when they name the same user, the same project,
    /// and the same calendar day. Time-of-day is ignored.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.user_id == other.user_id
            && self.project_id == other.project_id
            && self.date.date() == other.date.date()
    }
}

// Hand-rolled so the derived `year` and `month` appear in every encoded
// entry alongside the stored fields.
impl Serialize for TimesheetEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TimesheetEntry", 7)?;
        state.serialize_field("userId", &self.user_id)?;
        state.serialize_field("projectId", &self.project_id)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("hoursWorked", &self.hours_worked)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("year", &self.year())?;
        state.serialize_field("month", &self.month())?;
        state.end()
    }
}

/// One page of the date-ordered entry listing plus the live store size.
///
/// `entries` preserves the page's date order; `total_count` is the number of
/// entries in the whole store, not the page.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedEntries {
    pub entries: IndexMap<EntryId, TimesheetEntry>,
    pub total_count: usize,
}
