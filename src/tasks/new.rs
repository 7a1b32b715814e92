use axum::{debug_handler, extract::State, response::{IntoResponse, Response}, Json};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::info;

use crate::{db::Task, session, store::{Db, StoreError}, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub(crate) struct NewTaskQuery {
    title: String,
    description: Option<String>,
    due_date: String,
    assigned_to: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn create_task(
    State(db): State<Db>,
    session: Session,
    Json(NewTaskQuery { title, description, due_date, assigned_to }): Json<NewTaskQuery>,
) -> AppResult<Response> {
    let Some(user_id) = session::user_id(&session).await? else {
        return Ok(session::unauthorized());
    };

    let task = Task::new(user_id, title, description, due_date, assigned_to);
    let task_id = task.id.clone();
    info!(%task_id, created_by = %task.created_by, assigned_to = ?task.assigned_to, "new task");

    db.update(|doc| -> Result<(), StoreError> {
        doc.tasks.push(task);
        Ok(())
    })
    .await?;

    Ok(Json(json!({ "success": true, "task_id": task_id })).into_response())
}
