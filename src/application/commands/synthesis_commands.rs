//! Synthesis Commands

use tokio::fs::File;

use crate::domain::synthesis::RawSynthesisRequest;

/// 合成音频命令
#[derive(Debug, Clone)]
pub struct SynthesizeAudio {
    pub request: RawSynthesisRequest,
}

/// 合成结果的响应形态
#[derive(Debug)]
pub enum AudioPayload {
    /// 整个文件的 base64 文本
    Base64 { audio: String },

    /// 已打开的文件，直接作为响应体流式返回
    Stream {
        file: File,
        size_bytes: u64,
        content_type: String,
        file_name: String,
    },
}
