//! Read-side lookups over a loaded [`Document`].
//!
//! Every function is a linear scan in insertion order. Missing matches are
//! never errors: they come back as `None` or empty lists.

use serde::Serialize;

use crate::db::{Document, Message, Task, User};

/// Shown as a task's creator when `created_by` matches no user.
pub const UNKNOWN_CREATOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub creator_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    #[serde(flatten)]
    pub message: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserTasks {
    pub assigned: Vec<TaskView>,
    pub created: Vec<TaskView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

pub fn find_user_by_username<'a>(doc: &'a Document, username: &str) -> Option<&'a User> {
    doc.users.iter().find(|u| u.username == username)
}

pub fn find_user_by_id<'a>(doc: &'a Document, id: &str) -> Option<&'a User> {
    doc.users.iter().find(|u| u.id == id)
}

/// Creator name for a task, falling back to [`UNKNOWN_CREATOR`].
pub fn creator_name(doc: &Document, task: &Task) -> String {
    find_user_by_id(doc, &task.created_by)
        .map_or(UNKNOWN_CREATOR, |u| u.username.as_str())
        .to_owned()
}

/// Sender name for a message. Unlike tasks there is no fallback: an unknown
/// sender leaves the name unset.
pub fn sender_name(doc: &Document, message: &Message) -> Option<String> {
    find_user_by_id(doc, &message.sender_id).map(|u| u.username.clone())
}

fn task_view(doc: &Document, task: &Task) -> TaskView {
    TaskView {
        task: task.clone(),
        creator_name: creator_name(doc, task),
    }
}

/// Tasks assigned to and created by `user_id`. A self-assigned task shows up
/// in both lists.
pub fn tasks_for_user(doc: &Document, user_id: &str) -> UserTasks {
    let assigned = doc
        .tasks
        .iter()
        .filter(|t| t.assigned_to.as_deref() == Some(user_id))
        .map(|t| task_view(doc, t))
        .collect();
    let created = doc
        .tasks
        .iter()
        .filter(|t| t.created_by == user_id)
        .map(|t| task_view(doc, t))
        .collect();

    UserTasks { assigned, created }
}

pub fn messages_for_room(doc: &Document, room: &str) -> Vec<MessageView> {
    doc.messages
        .iter()
        .filter(|m| m.room == room)
        .map(|m| MessageView {
            message: m.clone(),
            sender_name: sender_name(doc, m),
        })
        .collect()
}

pub fn list_users(doc: &Document) -> Vec<UserSummary> {
    doc.users
        .iter()
        .map(|u| UserSummary {
            id: u.id.clone(),
            username: u.username.clone(),
        })
        .collect()
}
