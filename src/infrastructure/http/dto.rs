//! Data Transfer Objects

use serde::Serialize;

/// 合成成功消息
pub const AUDIO_GENERATED_MESSAGE: &str = "Áudio gerado com sucesso";

/// base64 模式下的成功响应
#[derive(Debug, Serialize)]
pub struct AudioGeneratedResponse {
    pub message: &'static str,
    pub audio: String,
}

impl AudioGeneratedResponse {
    pub fn new(audio: String) -> Self {
        Self {
            message: AUDIO_GENERATED_MESSAGE,
            audio,
        }
    }
}
