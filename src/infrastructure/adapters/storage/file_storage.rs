//! File Storage - 文件系统产物存储实现
//!
//! 实现 ArtifactStorePort trait

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};

use crate::application::ports::{ArtifactStoreError, ArtifactStorePort};

/// 文件系统产物存储
pub struct FileArtifactStore {
    /// 输出目录
    output_dir: PathBuf,
}

impl FileArtifactStore {
    /// 创建新的文件存储
    pub async fn new(output_dir: impl AsRef<Path>) -> Result<Self, ArtifactStoreError> {
        let output_dir = output_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&output_dir)
            .await
            .map_err(|e| ArtifactStoreError::IoError(e.to_string()))?;

        Ok(Self { output_dir })
    }
}

fn map_io_error(path: &Path, err: std::io::Error) -> ArtifactStoreError {
    if err.kind() == ErrorKind::NotFound {
        ArtifactStoreError::FileNotFound(path.to_string_lossy().to_string())
    } else {
        ArtifactStoreError::IoError(format!("{}: {}", path.display(), err))
    }
}

#[async_trait]
impl ArtifactStorePort for FileArtifactStore {
    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>, ArtifactStoreError> {
        fs::read(path).await.map_err(|e| map_io_error(path, e))
    }

    async fn open(&self, path: &Path) -> Result<(File, u64), ArtifactStoreError> {
        let file = File::open(path).await.map_err(|e| map_io_error(path, e))?;
        let metadata = file.metadata().await.map_err(|e| map_io_error(path, e))?;
        Ok((file, metadata.len()))
    }

    async fn remove(&self, path: &Path) -> Result<bool, ArtifactStoreError> {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted artifact");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ArtifactStoreError::IoError(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }
}
