//! Time Entry API Handlers
//!
//! Thin layer over [`TimeEntryLedger`]; all permission decisions happen in
//! the ledger, the handlers only resolve the acting employee and shape the
//! request.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::resolve_actor;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::ledger::{TimeEntryDraft, TimeEntryView};
use crate::utils::AppResult;

/// Query for the accessible listing: optional comma-separated employee ids
/// plus an optional inclusive date range
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub employee_ids: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ListQuery {
    fn requested_ids(&self) -> Option<Vec<String>> {
        self.employee_ids.as_ref().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(draft): Json<TimeEntryDraft>,
) -> AppResult<Json<TimeEntryView>> {
    let actor = resolve_actor(&state, &user).await?;
    let entry = state.ledger().create(&actor, draft).await?;
    Ok(Json(entry))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<TimeEntryView>> {
    let actor = resolve_actor(&state, &user).await?;
    let entry = state.ledger().get_by_id(&actor, &id).await?;
    Ok(Json(entry))
}

pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(draft): Json<TimeEntryDraft>,
) -> AppResult<Json<TimeEntryView>> {
    let actor = resolve_actor(&state, &user).await?;
    let entry = state.ledger().update(&actor, &id, draft).await?;
    Ok(Json(entry))
}

pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let actor = resolve_actor(&state, &user).await?;
    state.ledger().delete(&actor, &id).await?;
    Ok(Json(true))
}

pub async fn list_by_employee(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<TimeEntryView>>> {
    let actor = resolve_actor(&state, &user).await?;
    let entries = state.ledger().get_all_by_employee(&actor, &id).await?;
    Ok(Json(entries))
}

pub async fn list_accessible(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<TimeEntryView>>> {
    let actor = resolve_actor(&state, &user).await?;
    let requested = query.requested_ids();
    let entries = state
        .ledger()
        .get_all_accessible(&actor, requested.as_deref(), query.start_date, query.end_date)
        .await?;
    Ok(Json(entries))
}
