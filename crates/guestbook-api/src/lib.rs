pub mod entries;
pub mod error;
pub mod response;
pub mod users;

use std::sync::Arc;

use axum::{Router, routing::get};
use tracing::error;

use guestbook_db::Database;

use crate::error::{ApiError, ApiResult};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/entries", get(entries::list_entries).post(entries::add_entry))
        .with_state(state)
}

/// Run a blocking DB call off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&Database) -> guestbook_db::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(e.to_string())
        })?
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let db = Database::open_in_memory().unwrap();
        router(Arc::new(AppStateInner { db }))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_entry(body: Value) -> Request<Body> {
        Request::post("/entries")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn post_then_list_users() {
        let app = app();
        let (status, entry) = send(
            &app,
            post_entry(json!({"name": "Kerem", "subject": "S", "message": "M"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(entry["id"].as_i64().unwrap() > 0);
        assert!(entry["created_at"].is_string());
        assert_eq!(entry["subject"], "S");

        let (status, users) = send(&app, get_req("/users")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            users,
            json!({"users": [{"username": "Kerem", "last_entry": "S | M", "total_count_of_messages": 1}]})
        );
    }

    #[tokio::test]
    async fn list_entries_defaults_and_paging() {
        let app = app();
        for i in 1..=5 {
            let body = json!({"name": "Kerem", "subject": format!("s{}", i), "message": "m"});
            let (status, _) = send(&app, post_entry(body)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, page) = send(&app, get_req("/entries")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["page_size"], 3);
        assert_eq!(page["current_page_number"], 1);
        assert_eq!(page["total_pages"], 2);
        assert_eq!(page["links"], json!({"next": "/entries?page=2", "previous": null}));
        assert_eq!(page["entries"][0], json!({"user": "Kerem", "subject": "s5", "message": "m"}));

        let (_, page) = send(&app, get_req("/entries?page=2&limit=2")).await;
        assert_eq!(page["count"], 5);
        assert_eq!(page["total_pages"], 3);
        assert_eq!(
            page["links"],
            json!({"next": "/entries?page=3&limit=2", "previous": "/entries?page=1&limit=2"})
        );

        let (_, page) = send(&app, get_req("/entries?page=-1&limit=0")).await;
        assert_eq!(page["current_page_number"], 1);
        assert_eq!(page["page_size"], 1);
    }

    #[tokio::test]
    async fn invalid_entry_is_rejected() {
        let app = app();

        let (status, body) = send(&app, post_entry(json!({"name": "name"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.get("id").is_none());

        let (status, _) = send(
            &app,
            post_entry(json!({"name": "name", "subject": "", "message": "m"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, users) = send(&app, get_req("/users")).await;
        assert_eq!(users, json!({"users": []}));
    }

    #[tokio::test]
    async fn client_timestamp_is_ignored() {
        let app = app();
        let (status, entry) = send(
            &app,
            post_entry(json!({
                "name": "Kerem",
                "subject": "S",
                "message": "M",
                "created_at": "2020-01-01T00:00:00"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(entry["id"].as_i64().unwrap() > 0);
        assert!(!entry["created_at"].as_str().unwrap().starts_with("2020-"));
    }

    #[tokio::test]
    async fn non_numeric_page_is_rejected() {
        let (status, body) = send(&app(), get_req("/entries?page=abc")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Validation error");
    }
}
