//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::{ArtifactStoreError, TtsError};
use crate::domain::synthesis::ValidationErrors;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 请求校验失败（累积的全部错误）
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// 外部合成引擎失败
    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] TtsError),

    /// 产物读取失败
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<ArtifactStoreError> for ApplicationError {
    fn from(err: ArtifactStoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}
