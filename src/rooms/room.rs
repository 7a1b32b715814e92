use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Redirect, Response}};
use tower_sessions::Session;

use crate::{include_res, query, res, session, store::Db, AppResult, AppState};

use super::msg;

#[debug_handler(state = AppState)]
pub(crate) async fn room(
    State(db): State<Db>,
    session: Session,
    Path(room): Path<String>,
) -> AppResult<Response> {
    let Some(user_id) = session::user_id(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let doc = db.load().await?;

    let messages: String = query::messages_for_room(&doc, &room)
        .iter()
        .map(msg::msg_to_html)
        .collect();

    let content = res::fill(
        include_res!(str, "/pages/chat.html"),
        &[
            ("room", res::escape(&room).as_str()),
            ("messages", messages.as_str()),
        ],
    );

    let user = query::find_user_by_id(&doc, &user_id);
    let flashes = session::take_flashes(&session).await?;
    Ok(res::page(&format!("#{room}"), user, &flashes, &content).into_response())
}
