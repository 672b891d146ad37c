use axum::Router;

pub mod purchases;
pub mod system;

/// Router for all procurement endpoints.
pub fn router() -> Router {
    Router::new().merge(purchases::router())
}
