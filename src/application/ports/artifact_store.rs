//! Artifact Store Port - 出站端口
//!
//! 定义合成产物文件的定位、读取与删除

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;

/// 产物存储错误
#[derive(Debug, Error)]
pub enum ArtifactStoreError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Artifact Store Port - 出站端口
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// 输出目录
    fn output_dir(&self) -> &Path;

    /// 产物路径 `{output_dir}/{file_name}`
    fn artifact_path(&self, file_name: &str) -> PathBuf;

    /// 读取整个文件
    async fn read(&self, path: &Path) -> Result<Vec<u8>, ArtifactStoreError>;

    /// 打开文件用于流式响应，返回文件句柄和大小
    async fn open(&self, path: &Path) -> Result<(File, u64), ArtifactStoreError>;

    /// 删除文件
    ///
    /// 幂等：文件已不存在时返回 `Ok(false)`
    async fn remove(&self, path: &Path) -> Result<bool, ArtifactStoreError>;

    /// 检查文件是否存在
    async fn exists(&self, path: &Path) -> bool;
}
