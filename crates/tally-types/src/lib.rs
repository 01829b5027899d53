//! Foundation types for the tally timesheet service.
//!
//! Every other tally crate depends on `tally-types`.
//!
//! # Key Types
//!
//! - [`TimesheetEntry`] — one timesheet record (user, project, date, hours, description)
//! - [`EntryId`] — store-assigned entry identifier
//! - [`PagedEntries`] — one page of the date-ordered listing plus the live total
//! - [`SameWeek`] — ISO-8601 week equality over calendar dates

pub mod entry;
pub mod temporal;

pub use entry::{EntryId, PagedEntries, TimesheetEntry};
pub use temporal::{parse_flexible, SameWeek};
