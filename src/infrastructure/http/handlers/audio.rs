//! Audio Handlers

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::application::{AudioPayload, SynthesizeAudio};
use crate::domain::synthesis::RawSynthesisRequest;
use crate::infrastructure::http::dto::AudioGeneratedResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /audio
///
/// `base64 = "true"` 时返回 JSON，否则以 `audio/{formato}` 流式返回文件内容
pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawSynthesisRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| {
        ApiError::BadRequest(format!("Corpo da requisição inválido: {}", e.body_text()))
    })?;

    let payload = state
        .synthesize_audio_handler
        .handle(SynthesizeAudio { request })
        .await?;

    match payload {
        AudioPayload::Base64 { audio } => {
            Ok((StatusCode::OK, Json(AudioGeneratedResponse::new(audio))).into_response())
        }
        AudioPayload::Stream {
            file,
            size_bytes,
            content_type,
            file_name,
        } => {
            let body = Body::from_stream(ReaderStream::new(file));

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, size_bytes)
                .header(header::CONTENT_DISPOSITION, content_disposition(&file_name))
                .body(body)
                .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
        }
    }
}

/// `inline; filename="..."`，非 ASCII 文件名额外附带 RFC 5987 的 `filename*`
fn content_disposition(file_name: &str) -> String {
    let fallback = header_safe(file_name);
    if file_name.is_ascii() {
        format!("inline; filename=\"{}\"", fallback)
    } else {
        format!(
            "inline; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            encode_ext_value(file_name)
        )
    }
}

/// 去掉不能出现在带引号 header 参数里的字符，非 ASCII 字符也替换掉
fn header_safe(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c == '"' || c == '\\' || c.is_control() || !c.is_ascii() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// RFC 5987 attr-char 之外的字节按 UTF-8 百分号编码
fn encode_ext_value(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => (b as char).to_string(),
            _ => format!("%{:02X}", b),
        })
        .collect()
}
