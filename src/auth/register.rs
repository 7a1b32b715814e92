use axum::{debug_handler, extract::State, response::{IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use thiserror::Error;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    db::{User, UsernameTaken},
    include_res, res, session,
    store::{Db, StoreError},
    AppResult, AppState,
};

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error(transparent)]
    UsernameTaken(#[from] UsernameTaken),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Adds a user. A taken username leaves the stored document untouched.
pub async fn register_user(
    db: &Db,
    username: String,
    password: String,
    email: String,
) -> Result<User, RegisterError> {
    db.update(|doc| -> Result<User, RegisterError> {
        let user = doc.insert_user(User::new(username, password, email))?;
        Ok(user.clone())
    })
    .await
}

#[derive(Deserialize)]
pub(crate) struct RegisterForm {
    username: String,
    password: String,
    email: String,
}

async fn render(session: &Session) -> AppResult<Response> {
    let flashes = session::take_flashes(session).await?;
    let content = include_res!(str, "/pages/register.html");
    Ok(res::page("Register", None, &flashes, content).into_response())
}

#[debug_handler]
pub(crate) async fn register_page(session: Session) -> AppResult<Response> {
    render(&session).await
}

#[debug_handler(state = AppState)]
pub(crate) async fn register(
    State(db): State<Db>,
    session: Session,
    Form(RegisterForm { username, password, email }): Form<RegisterForm>,
) -> AppResult<Response> {
    match register_user(&db, username, password, email).await {
        Ok(user) => {
            info!(user_id = %user.id, "adding {}", user.username);
            session::flash(&session, "Registration successful! You can now log in.").await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(RegisterError::UsernameTaken(UsernameTaken(username))) => {
            warn!("username {username:?} already taken");
            session::flash(&session, "A user with that name already exists").await?;
            render(&session).await
        }
        Err(RegisterError::Store(e)) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn duplicate_registration_never_mutates() {
        let store = MemoryStore::default();
        let db = Db::new(store.clone());

        let first = register_user(&db, "carol".into(), "pw".into(), "c@x".into())
            .await
            .unwrap();
        let before = db.load().await.unwrap();

        for _ in 0..3 {
            let err = register_user(&db, "carol".into(), "other".into(), "d@x".into())
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                RegisterError::UsernameTaken(UsernameTaken(ref u)) if u == "carol"
            ));
        }

        let after = db.load().await.unwrap();
        assert_eq!(after, before);
        assert_eq!(after.users, vec![first]);
        assert_eq!(store.save_count(), 1);
    }
}
