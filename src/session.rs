use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde_json::json;
use tower_sessions::Session;

use crate::AppResult;

pub const USER_ID: &str = "user_id";
pub const USERNAME: &str = "username";
pub const FLASH: &str = "flash";

pub const NOT_AUTHORIZED: &str = "Not authorized";

/// The logged-in user's id, if any. The core never checks that the user still
/// exists; the session id is trusted as-is.
pub async fn user_id(session: &Session) -> AppResult<Option<String>> {
    Ok(session.get::<String>(USER_ID).await?)
}

pub async fn log_in(session: &Session, user_id: &str, username: &str) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(USER_ID, user_id).await?;
    session.insert(USERNAME, username).await?;
    Ok(())
}

/// Queues a message for the next rendered page.
pub async fn flash(session: &Session, message: impl Into<String>) -> AppResult<()> {
    let mut messages = session.get::<Vec<String>>(FLASH).await?.unwrap_or_default();
    messages.push(message.into());
    session.insert(FLASH, messages).await?;
    Ok(())
}

pub async fn take_flashes(session: &Session) -> AppResult<Vec<String>> {
    Ok(session.remove::<Vec<String>>(FLASH).await?.unwrap_or_default())
}

/// Rejection for API calls made without a session.
pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "error": NOT_AUTHORIZED })),
    )
        .into_response()
}
