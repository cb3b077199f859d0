//! Delayed Cleanup Scheduler Implementation

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;

use crate::application::ports::{ArtifactStorePort, CleanupSchedulerPort};

/// 待执行的删除
struct PendingDeletion {
    /// 调度序号，用于区分同一路径的新旧计时器
    id: u64,
    handle: AbortHandle,
}

/// 延迟删除调度器
///
/// 每次调度启动一个独立的 tokio 任务：sleep 到期后删除文件。
/// 登记表按路径索引，同名产物被重新生成时旧计时器会被取消
pub struct DelayedCleanupScheduler {
    delay: Duration,
    artifact_store: Arc<dyn ArtifactStorePort>,
    /// path -> PendingDeletion
    pending: Arc<DashMap<PathBuf, PendingDeletion>>,
    next_id: AtomicU64,
}

impl DelayedCleanupScheduler {
    pub fn new(delay: Duration, artifact_store: Arc<dyn ArtifactStorePort>) -> Self {
        Self {
            delay,
            artifact_store,
            pending: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl CleanupSchedulerPort for DelayedCleanupScheduler {
    fn schedule(&self, path: PathBuf) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let delay = self.delay;
        let artifact_store = self.artifact_store.clone();
        let pending = self.pending.clone();
        let task_path = path.clone();

        // 登记完成之后任务才开始计时，保证 remove_if 一定发生在 insert 之后
        let (registered_tx, registered_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let _ = registered_rx.await;
            tokio::time::sleep(delay).await;

            match artifact_store.remove(&task_path).await {
                Ok(true) => tracing::info!(
                    path = %task_path.display(),
                    delay_secs = delay.as_secs(),
                    "Expired audio file removed"
                ),
                Ok(false) => tracing::debug!(
                    path = %task_path.display(),
                    "Expired audio file already gone"
                ),
                // 不重试
                Err(e) => tracing::error!(
                    path = %task_path.display(),
                    error = %e,
                    "Failed to remove expired audio file"
                ),
            }

            pending.remove_if(&task_path, |_, entry| entry.id == id);
        })
        .abort_handle();

        if let Some(previous) = self.pending.insert(path.clone(), PendingDeletion { id, handle }) {
            previous.handle.abort();
            tracing::debug!(path = %path.display(), "Replaced pending deletion");
        }
        let _ = registered_tx.send(());

        tracing::debug!(
            path = %path.display(),
            delay_secs = delay.as_secs(),
            "Deletion scheduled"
        );
    }

    fn cancel(&self, path: &Path) -> bool {
        match self.pending.remove(path) {
            Some((_, entry)) => {
                entry.handle.abort();
                tracing::debug!(path = %path.display(), "Pending deletion cancelled");
                true
            }
            None => false,
        }
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FileArtifactStore;
    use tempfile::tempdir;

    async fn setup(delay: Duration) -> (tempfile::TempDir, Arc<FileArtifactStore>, DelayedCleanupScheduler) {
        let temp_dir = tempdir().unwrap();
        let store = Arc::new(FileArtifactStore::new(temp_dir.path()).await.unwrap());
        let scheduler = DelayedCleanupScheduler::new(delay, store.clone());
        (temp_dir, store, scheduler)
    }

    #[tokio::test]
    async fn test_file_removed_after_delay() {
        let (_dir, store, scheduler) = setup(Duration::from_millis(100)).await;
        let path = store.artifact_path("teste.mp3");
        tokio::fs::write(&path, b"audio").await.unwrap();

        scheduler.schedule(path.clone());

        // 调度不阻塞，文件仍在
        assert!(path.exists());
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!path.exists());
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_an_error() {
        let (_dir, store, scheduler) = setup(Duration::from_millis(20)).await;
        let path = store.artifact_path("nunca-existiu.mp3");

        scheduler.schedule(path.clone());
        scheduler.schedule(store.artifact_path("outro.mp3"));
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn test_reschedule_replaces_pending_deletion() {
        let (_dir, store, scheduler) = setup(Duration::from_millis(400)).await;
        let path = store.artifact_path("teste.mp3");
        tokio::fs::write(&path, b"primeiro").await.unwrap();

        scheduler.schedule(path.clone());
        tokio::time::sleep(Duration::from_millis(200)).await;

        // 同名产物被重新生成
        tokio::fs::write(&path, b"segundo").await.unwrap();
        scheduler.schedule(path.clone());
        assert_eq!(scheduler.pending(), 1);

        // 第一个计时器的到期时间已过，文件仍应存在
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(path.exists());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!path.exists());
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn test_cancel() {
        let (_dir, store, scheduler) = setup(Duration::from_millis(100)).await;
        let path = store.artifact_path("teste.mp3");
        tokio::fs::write(&path, b"audio").await.unwrap();

        scheduler.schedule(path.clone());
        assert!(scheduler.cancel(&path));
        assert!(!scheduler.cancel(&path));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(path.exists());
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn test_removal_failure_is_logged_and_dropped() {
        let (_dir, store, scheduler) = setup(Duration::from_millis(20)).await;

        // 目录不能用 remove_file 删除
        let path = store.artifact_path("diretorio");
        tokio::fs::create_dir(&path).await.unwrap();

        scheduler.schedule(path.clone());
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(path.is_dir());
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn test_zero_delay() {
        let (_dir, store, scheduler) = setup(Duration::ZERO).await;
        let path = store.artifact_path("teste.mp3");
        tokio::fs::write(&path, b"audio").await.unwrap();

        scheduler.schedule(path.clone());
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!path.exists());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.delay(), Duration::ZERO);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_zero_delay_leaves_no_stale_entries() {
        let (_dir, store, scheduler) = setup(Duration::ZERO).await;

        for i in 0..2_000 {
            let path = store.artifact_path(&format!("audio-{}.mp3", i % 50));
            tokio::fs::write(&path, b"audio").await.unwrap();
            scheduler.schedule(path);
        }

        for _ in 0..100 {
            if scheduler.pending() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(scheduler.pending(), 0);
    }
}
