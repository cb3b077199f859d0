//! HTTP Routes
//!
//! API Endpoints:
//! - /audio    POST  合成音频（需要 `x-api-key`）
//! - /ping     GET   健康检查

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::middleware::require_api_key;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/audio", post(handlers::generate_audio))
        // 只作用于上面的路由
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
        .route("/ping", get(handlers::ping))
}
