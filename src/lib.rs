pub mod auth;
pub mod config;
pub mod db;
pub mod query;
pub mod res;
pub mod rooms;
pub mod session;
pub mod store;
pub mod tasks;

mod appresult;
mod index;
mod users;

use axum::{Router, extract::FromRef, routing::get};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

pub use appresult::{AppError, AppResult};
use store::Db;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Db,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

/// The full application, sessions included.
pub fn app(state: AppState, session_inactivity: time::Duration) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(session_inactivity));

    Router::new()
        .route("/", get(index::index))
        .route("/dashboard", get(index::dashboard))
        .route("/get_users", get(users::get_users))
        .route("/static/app.js", get(res::script))

        .merge(auth::router())
        .merge(rooms::router())
        .merge(tasks::router())

        .with_state(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
