use axum::{debug_handler, extract::State, response::{IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{include_res, query, res, session, store::Db, AppResult, AppState};

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    username: String,
    password: String,
}

async fn render(session: &Session) -> AppResult<Response> {
    let flashes = session::take_flashes(session).await?;
    let content = include_res!(str, "/pages/login.html");
    Ok(res::page("Log in", None, &flashes, content).into_response())
}

#[debug_handler]
pub(crate) async fn login_page(session: Session) -> AppResult<Response> {
    render(&session).await
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(db): State<Db>,
    session: Session,
    Form(LoginForm { username, password }): Form<LoginForm>,
) -> AppResult<Response> {
    let doc = db.load().await?;

    match query::find_user_by_username(&doc, &username) {
        Some(user) if user.password == password => {
            session::log_in(&session, &user.id, &user.username).await?;
            info!(user_id = %user.id, "welcome {}", user.username);
            Ok(Redirect::to("/dashboard").into_response())
        }
        _ => {
            warn!("failed login for {username:?}");
            session::flash(&session, "Invalid username or password").await?;
            render(&session).await
        }
    }
}
