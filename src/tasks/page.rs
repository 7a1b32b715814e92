use axum::{debug_handler, extract::State, response::{IntoResponse, Redirect, Response}};
use tower_sessions::Session;

use crate::{include_res, query::{self, TaskView}, res, session, store::Db, AppResult, AppState};

fn task_to_html(view: &TaskView) -> String {
    let task = &view.task;

    res::fill(
        include_res!(str, "/pages/task_item.html"),
        &[
            ("id", res::escape(&task.id).as_str()),
            ("title", res::escape(&task.title).as_str()),
            ("due_date", res::escape(&task.due_date).as_str()),
            ("status", res::escape(&task.status).as_str()),
            ("creator_name", res::escape(&view.creator_name).as_str()),
            ("description", res::escape(&task.description).as_str()),
        ],
    )
}

pub fn task_list_html(tasks: &[TaskView]) -> String {
    if tasks.is_empty() {
        return "<li class=\"meta\">Nothing here yet.</li>".to_owned();
    }
    tasks.iter().map(task_to_html).collect()
}

#[debug_handler(state = AppState)]
pub(crate) async fn tasks(
    State(db): State<Db>,
    session: Session,
) -> AppResult<Response> {
    let Some(user_id) = session::user_id(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let doc = db.load().await?;
    let query::UserTasks { assigned, created } = query::tasks_for_user(&doc, &user_id);

    let content = res::fill(
        include_res!(str, "/pages/tasks.html"),
        &[
            ("my_tasks", task_list_html(&assigned).as_str()),
            ("created_tasks", task_list_html(&created).as_str()),
        ],
    );

    let user = query::find_user_by_id(&doc, &user_id);
    let flashes = session::take_flashes(&session).await?;
    Ok(res::page("Tasks", user, &flashes, &content).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Task;

    #[test]
    fn task_item_is_escaped() {
        let view = TaskView {
            task: Task::new("u1".into(), "<b>ship</b>".into(), None, "2025-05-01".into(), None),
            creator_name: query::UNKNOWN_CREATOR.to_owned(),
        };

        let html = task_list_html(&[view]);
        assert!(html.contains("&lt;b&gt;ship&lt;/b&gt;"));
        assert!(html.contains("from Unknown"));
        assert!(html.contains("pending"));
    }

    #[test]
    fn placeholder_shaped_title_stays_literal() {
        let view = TaskView {
            task: Task::new(
                "u1".into(),
                "{description}".into(),
                Some("real description".into()),
                "2025-05-01".into(),
                None,
            ),
            creator_name: "{title}".to_owned(),
        };

        let html = task_list_html(&[view]);
        assert!(html.contains("<strong>{description}</strong>"));
        assert!(html.contains("from {title}"));
        assert_eq!(html.matches("real description").count(), 1);
    }

    #[test]
    fn empty_list_placeholder() {
        assert!(task_list_html(&[]).contains("Nothing here yet."));
    }
}
