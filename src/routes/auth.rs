use axum::{Router, routing::post};
use crate::state::AppState;
use crate::handlers::auth::login;

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}
