//! TTS Engine Port - TTS 合成引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Failed to start TTS engine: {0}")]
    Spawn(String),

    #[error("TTS engine exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("TTS engine timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("TTS engine did not produce an output file: {0}")]
    MissingOutput(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl TtsError {
    /// 返回给客户端的错误详情
    ///
    /// 进程失败时只返回进程的 stderr
    pub fn details(&self) -> String {
        match self {
            Self::ProcessFailed { stderr, .. } => stderr.clone(),
            other => other.to_string(),
        }
    }
}

/// 合成任务
#[derive(Debug, Clone)]
pub struct SynthesisJob {
    /// 要合成的文本，通过 stdin 传给引擎
    pub text: String,
    /// 模型标识
    pub model_id: String,
    /// 产物输出路径
    pub output_path: PathBuf,
}

/// 合成产物
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// TTS Engine Port
///
/// 外部 TTS 引擎的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 执行合成，成功时 `job.output_path` 处恰好写入一个文件
    ///
    /// 失败时不清理可能残留的半成品文件
    async fn synthesize(&self, job: SynthesisJob) -> Result<GeneratedArtifact, TtsError>;
}
