use axum::{debug_handler, extract::State, response::{IntoResponse, Response}, Json};
use serde_json::json;
use tower_sessions::Session;

use crate::{query, session, store::Db, AppResult, AppState};

#[debug_handler(state = AppState)]
pub async fn get_users(
    State(db): State<Db>,
    session: Session,
) -> AppResult<Response> {
    if session::user_id(&session).await?.is_none() {
        return Ok(session::unauthorized());
    }

    let doc = db.load().await?;
    Ok(Json(json!({ "success": true, "users": query::list_users(&doc) })).into_response())
}
