//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::{error_logging_middleware, API_KEY_HEADER};
use super::routes::create_routes;
use super::state::AppState;

/// 单个字符在 JSON 中最长的转义形式（`\uXXXX\uXXXX` 代理对）
const MAX_ESCAPED_CHAR_BYTES: usize = 12;

/// 文本之外的字段与 JSON 结构预留
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// 默认文本上限对应的字符数
const DEFAULT_MAX_CHARS: usize = 100_000;

/// 能容纳 `max_chars` 个字符（全部转义）的请求体大小
pub fn body_limit_for(max_chars: usize) -> usize {
    max_chars
        .saturating_mul(MAX_ESCAPED_CHAR_BYTES)
        .saturating_add(BODY_OVERHEAD_BYTES)
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 请求体大小上限
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            body_limit: body_limit_for(DEFAULT_MAX_CHARS),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// 按文本字符上限调整请求体上限
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.body_limit = body_limit_for(max_chars);
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([API_KEY_HEADER, CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600));

        create_routes(self.state.clone())
            .layer(DefaultBodyLimit::max(self.config.body_limit))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}
