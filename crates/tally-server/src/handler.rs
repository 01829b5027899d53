use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;

use tally_store::{StoreError, StoreResult, TimesheetStore};
use tally_types::{EntryId, PagedEntries, TimesheetEntry};

use crate::error::ServerResult;

/// Store handle shared across request handlers.
pub type SharedStore = Arc<dyn TimesheetStore>;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct WeekParams {
    #[serde(default, deserialize_with = "tally_types::temporal::flexible_opt::deserialize")]
    pub date: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: EntryId,
}

/// `GET /timesheet`: one date-ordered page plus the live total.
pub async fn all_entries(
    State(store): State<SharedStore>,
    Query(page): Query<PageParams>,
) -> ServerResult<Json<PagedEntries>> {
    let entries = store.all_entries(page.offset, page.limit)?;
    let total_count = store.total_count()?;
    Ok(Json(PagedEntries {
        entries,
        total_count,
    }))
}

/// `GET /timesheet/entries/:user_id`: a user's entries, optionally one week's.
pub async fn entries_for_user(
    State(store): State<SharedStore>,
    Path(user_id): Path<i32>,
    Query(week): Query<WeekParams>,
) -> ServerResult<Json<HashMap<EntryId, TimesheetEntry>>> {
    Ok(Json(store.entries_for_user_per_week(user_id, week.date)?))
}

/// `GET /timesheet/projects/:user_id`: hours per project for a user.
pub async fn hours_per_project(
    State(store): State<SharedStore>,
    Path(user_id): Path<i32>,
    Query(week): Query<WeekParams>,
) -> ServerResult<Json<HashMap<i32, f64>>> {
    Ok(Json(store.hours_per_project(user_id, week.date)?))
}

/// `POST /timesheet`: add an entry. Duplicates report `false`, not an error.
pub async fn add_entry(
    State(store): State<SharedStore>,
    Json(entry): Json<TimesheetEntry>,
) -> ServerResult<Json<bool>> {
    accepted(store.add(entry))
}

/// `PUT /timesheet?id=`: update an entry. Same duplicate contract as add.
pub async fn update_entry(
    State(store): State<SharedStore>,
    Query(params): Query<IdParams>,
    Json(entry): Json<TimesheetEntry>,
) -> ServerResult<Json<bool>> {
    accepted(store.update(params.id, entry))
}

/// `DELETE /timesheet?id=`: remove an entry. Unknown ids are a no-op.
pub async fn delete_entry(
    State(store): State<SharedStore>,
    Query(params): Query<IdParams>,
) -> ServerResult<()> {
    store.delete(params.id)?;
    Ok(())
}

/// Health check handler.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// A duplicate conflict is part of the API contract (200 with `false`), not a
// server failure; everything else goes to the error boundary.
fn accepted(result: StoreResult<EntryId>) -> ServerResult<Json<bool>> {
    match result {
        Ok(_) => Ok(Json(true)),
        Err(StoreError::Duplicate { .. }) => Ok(Json(false)),
        Err(err) => Err(err.into()),
    }
}
