mod msg;
mod room;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use msg::msg_to_html;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat/{room}", get(room::room))
        .route("/send_message", post(msg::send_message))
        .route("/get_messages/{room}", get(msg::get_messages))
}
