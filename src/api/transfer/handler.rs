//! CSV Import/Export Handlers

use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::resolve_actor;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub employee_ids: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// POST /api/csv/import
///
/// Expects one multipart part holding a .csv file. The whole batch is
/// rejected when any row targets an employee the actor has no rights over.
pub async fn import(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<usize>>> {
    let actor = resolve_actor(&state, &user).await?;

    let mut content: Option<String> = None;
    while let Some(field) = multipart.next_field().await? {
        let file_name = field.file_name().map(str::to_string);
        match file_name {
            Some(name) if name.to_lowercase().ends_with(".csv") => {
                let bytes = field.bytes().await?;
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|_| AppError::validation("File is not valid UTF-8"))?;
                content = Some(text);
                break;
            }
            Some(name) => {
                return Err(AppError::validation(format!(
                    "Unsupported file extension: {}",
                    name
                )));
            }
            None => continue,
        }
    }

    let content = content.ok_or_else(|| AppError::validation("No CSV file in request"))?;
    let created = state.transfer().import(&actor, &content).await?;

    Ok(ok_with_message(
        created,
        format!("Import finished: {} entries created", created),
    ))
}

/// GET /api/csv/export
pub async fn export(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ExportQuery>,
) -> AppResult<impl IntoResponse> {
    let actor = resolve_actor(&state, &user).await?;

    let requested: Option<Vec<String>> = query.employee_ids.as_ref().map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    });

    let csv = state
        .transfer()
        .export(&actor, requested.as_deref(), query.start_date, query.end_date)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"time-entries.csv\"",
            ),
        ],
        csv,
    ))
}
