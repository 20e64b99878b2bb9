use axum::{
    routing::{get, post},
    Router,
};

use super::AppState;

pub mod route;
pub mod schema;
pub mod template;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-test", post(route::send_test))
        .route("/send-custom", post(route::send_custom))
        .route("/status/:email_id", get(route::status))
}
