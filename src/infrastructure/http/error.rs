//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 合成失败时返回的固定错误信息
pub const SYNTHESIS_FAILED_MESSAGE: &str = "Erro ao gerar o áudio";

/// API Key 校验失败时返回的固定错误信息
pub const ACCESS_DENIED_MESSAGE: &str = "Acesso negado: API Key inválida";

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 403
    Forbidden,
    /// 400
    BadRequest(String),
    /// 500，附带引擎的错误输出
    SynthesisFailed(String),
    /// 500
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, response) = match self {
            ApiError::Forbidden => {
                tracing::warn!("Rejected request with invalid API key");
                (StatusCode::FORBIDDEN, ErrorResponse::new(ACCESS_DENIED_MESSAGE))
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, ErrorResponse::new(msg))
            }
            ApiError::SynthesisFailed(details) => {
                tracing::error!(details = %details, "Audio synthesis failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(SYNTHESIS_FAILED_MESSAGE, details),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg))
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::Validation(errors) => ApiError::BadRequest(errors.to_string()),
            ApplicationError::Synthesis(e) => ApiError::SynthesisFailed(e.details()),
            ApplicationError::StorageError(msg) => ApiError::Internal(msg),
        }
    }
}
