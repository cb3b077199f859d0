//! HTTP Middleware
//!
//! - HTTP 状态码错误日志中间件
//! - `x-api-key` 共享密钥校验

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderName;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use super::error::ApiError;
use super::state::AppState;

/// API Key 请求头
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

fn api_key_matches(provided: &str, expected: &str) -> bool {
    bool::from(provided.as_bytes().ct_eq(expected.as_bytes()))
}

/// API Key 校验中间件
///
/// 未配置 API Key 时拒绝所有请求
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(&API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match (state.api_key.as_deref(), provided) {
        (Some(expected), Some(provided)) if api_key_matches(provided, expected) => {
            Ok(next.run(request).await)
        }
        _ => Err(ApiError::Forbidden),
    }
}

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    async fn ok_handler() -> &'static str {
        "OK"
    }

    async fn error_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    #[test]
    fn test_api_key_matches() {
        assert!(api_key_matches("secret", "secret"));
        assert!(!api_key_matches("secret", "Secret"));
        assert!(!api_key_matches("secre", "secret"));
        assert!(!api_key_matches("", "secret"));
    }

    #[tokio::test]
    async fn test_error_logging_passes_responses_through() {
        let app = Router::new()
            .route("/ok", get(ok_handler))
            .route("/error", get(error_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware));

        let request = HttpRequest::builder()
            .uri("/ok")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let request = HttpRequest::builder()
            .uri("/error")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
