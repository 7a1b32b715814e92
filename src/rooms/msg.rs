use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Response}, Json};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::debug;

use crate::{
    db::Message,
    include_res,
    query::{self, MessageView},
    res, session,
    store::{Db, StoreError},
    AppResult, AppState,
};

#[derive(Deserialize)]
pub(crate) struct SendMessageQuery {
    message: String,
    room: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn send_message(
    State(db): State<Db>,
    session: Session,
    Json(SendMessageQuery { message, room }): Json<SendMessageQuery>,
) -> AppResult<Response> {
    let Some(user_id) = session::user_id(&session).await? else {
        return Ok(session::unauthorized());
    };

    let message = Message::new(user_id, room, message);
    let message_id = message.id.clone();
    debug!(%message_id, room = %message.room, "new message");

    db.update(|doc| -> Result<(), StoreError> {
        doc.messages.push(message);
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "success": true, "message_id": message_id })).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn get_messages(
    State(db): State<Db>,
    session: Session,
    Path(room): Path<String>,
) -> AppResult<Response> {
    if session::user_id(&session).await?.is_none() {
        return Ok(session::unauthorized());
    }

    let doc = db.load().await?;
    let messages = query::messages_for_room(&doc, &room);

    Ok(Json(json!({ "success": true, "messages": messages })).into_response())
}

pub fn msg_to_html(view: &MessageView) -> String {
    let sender = view.sender_name.as_deref().unwrap_or("?");

    res::fill(
        include_res!(str, "/pages/message.html"),
        &[
            ("id", res::escape(&view.message.id).as_str()),
            ("sender_name", res::escape(sender).as_str()),
            ("timestamp", res::escape(&view.message.timestamp).as_str()),
            ("content", res::escape(&view.message.content).as_str()),
        ],
    )
}
