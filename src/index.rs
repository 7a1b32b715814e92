use axum::{debug_handler, extract::State, response::{IntoResponse, Redirect, Response}};
use tower_sessions::Session;

use crate::{include_res, query, res, session, store::Db, tasks, AppResult, AppState};

#[debug_handler]
pub async fn index(session: Session) -> AppResult<Response> {
    if session::user_id(&session).await?.is_some() {
        Ok(Redirect::to("/dashboard").into_response())
    } else {
        Ok(Redirect::to("/login").into_response())
    }
}

#[debug_handler(state = AppState)]
pub async fn dashboard(
    State(db): State<Db>,
    session: Session,
) -> AppResult<Response> {
    let Some(user_id) = session::user_id(&session).await? else {
        return Ok(
            Redirect::to("/login")
                .into_response()
        );
    };

    let doc = db.load().await?;
    let user = query::find_user_by_id(&doc, &user_id);
    let my_tasks = query::tasks_for_user(&doc, &user_id).assigned;

    let username = user.map_or("", |u| u.username.as_str());
    let content = res::fill(
        include_res!(str, "/pages/dashboard.html"),
        &[
            ("username", res::escape(username).as_str()),
            ("tasks", tasks::task_list_html(&my_tasks).as_str()),
        ],
    );

    let flashes = session::take_flashes(&session).await?;
    Ok(res::page("Dashboard", user, &flashes, &content).into_response())
}
