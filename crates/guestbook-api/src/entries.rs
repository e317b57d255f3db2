use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Deserialize;
use tracing::info;

use guestbook_types::DEFAULT_PAGE_SIZE;
use guestbook_types::api::{EntryList, EntryRecord, NewEntry};

use crate::error::{ApiError, ApiResult};
use crate::response::PrettyJson;
use crate::{AppState, with_db};

#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Paginated with `page`/`limit` query params; any integer is accepted and
/// normalized by the data layer.
pub async fn list_entries(
    State(state): State<AppState>,
    query: Result<Query<EntryQuery>, QueryRejection>,
) -> ApiResult<PrettyJson<EntryList>> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;

    let entries = with_db(&state, move |db| db.list_entries(query.page, query.limit)).await?;
    Ok(PrettyJson(entries))
}

pub async fn add_entry(
    State(state): State<AppState>,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> ApiResult<PrettyJson<EntryRecord>> {
    let Json(entry) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    validate(&entry)?;

    let record = with_db(&state, move |db| db.add_entry(&entry)).await?;
    info!("Entry {} posted by user {}", record.id, record.user_id);

    Ok(PrettyJson(record))
}

fn validate(entry: &NewEntry) -> ApiResult<()> {
    let fields = [
        ("name", &entry.name),
        ("subject", &entry.subject),
        ("message", &entry.message),
    ];

    for (field, value) in fields {
        if value.is_empty() {
            return Err(ApiError::Validation(format!("`{}` must not be empty", field)));
        }
    }

    Ok(())
}
