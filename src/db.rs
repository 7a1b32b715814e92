use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_STATUS: &str = "pending";

/// The whole persisted state. Saved and loaded as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub tasks: Vec<Task>,

    // unique: users.id
    // unique: users.username
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Kept in clear text so existing data files stay readable. This is a known
    /// security defect; credentials should move to a salted hash.
    pub password: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender_id: String,
    pub room: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub due_date: String,
    pub created_by: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub created_at: String,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_owned()
}

/// Older files can carry `"description": null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("username {0:?} is already taken")]
pub struct UsernameTaken(pub String);

/// Local time in the `YYYY-MM-DDTHH:MM:SS.ffffff` form used throughout the data file.
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl User {
    pub fn new(username: String, password: String, email: String) -> Self {
        Self {
            id: new_id(),
            username,
            password,
            email,
            created_at: now_timestamp(),
        }
    }
}

impl Message {
    pub fn new(sender_id: String, room: String, content: String) -> Self {
        Self {
            id: new_id(),
            content,
            sender_id,
            room,
            timestamp: now_timestamp(),
        }
    }
}

impl Task {
    pub fn new(
        created_by: String,
        title: String,
        description: Option<String>,
        due_date: String,
        assigned_to: Option<String>,
    ) -> Self {
        Self {
            id: new_id(),
            title,
            description: description.unwrap_or_default(),
            due_date,
            created_by,
            // an empty select in the task form means "nobody"
            assigned_to: assigned_to.filter(|id| !id.is_empty()),
            status: default_status(),
            created_at: now_timestamp(),
        }
    }
}

impl Document {
    /// Appends `user` unless its username is already present.
    pub fn insert_user(&mut self, user: User) -> Result<&User, UsernameTaken> {
        if self.users.iter().any(|u| u.username == user.username) {
            return Err(UsernameTaken(user.username));
        }

        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }
}
