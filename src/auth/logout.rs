use axum::{debug_handler, response::Redirect};
use tower_sessions::Session;

use crate::{session, AppResult};

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<Redirect> {
    if let Some(user_id) = session::user_id(&session).await? {
        tracing::info!(%user_id, "logout");
    }
    session.flush().await?;
    Ok(Redirect::to("/login"))
}
