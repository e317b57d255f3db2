use axum::extract::State;

use guestbook_types::api::UserList;

use crate::error::ApiResult;
use crate::response::PrettyJson;
use crate::{AppState, with_db};

/// No pagination here; every user is returned.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<PrettyJson<UserList>> {
    let users = with_db(&state, |db| db.list_users()).await?;
    Ok(PrettyJson(users))
}
