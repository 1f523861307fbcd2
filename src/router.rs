use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState,
    error::AppError,
    middleware::{auth_middleware, log_errors},
    routes,
};

async fn not_found() -> AppError {
    AppError::NotFound
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    // 将路由分为公开路由和受保护路由
    let public_routes = Router::new()
        .route("/", get(routes::feedback::index))
        .route("/submit", post(routes::feedback::submit))
        .route("/view_feedback", get(routes::feedback::view_feedback))
        .route(
            "/staff/register",
            get(routes::staff::register_page).post(routes::staff::register),
        )
        .route(
            "/staff/login",
            get(routes::staff::login_page).post(routes::staff::login),
        )
        .route("/staff/logout", get(routes::staff::logout));

    let protected_routes = Router::new()
        .route("/staff/dashboard", get(routes::staff::dashboard))
        .route("/reply/{feedback_id}", post(routes::feedback::reply))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(axum::middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
