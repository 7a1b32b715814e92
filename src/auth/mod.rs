mod login;
mod logout;
mod register;

use axum::{routing::get, Router};

use crate::AppState;

pub use register::{register_user, RegisterError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login::login_page).post(login::login))
        .route("/register", get(register::register_page).post(register::register))
        .route("/logout", get(logout::logout))
}
