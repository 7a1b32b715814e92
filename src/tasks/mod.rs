mod new;
mod page;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use page::task_list_html;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(page::tasks))
        .route("/create_task", post(new::create_task))
}
