//! Cleanup Scheduler Port - 延迟删除调度
//!
//! 响应返回后，产物文件在配置的延迟之后被删除

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Cleanup Scheduler Port
///
/// 调度是 fire-and-forget：调用方不等待删除结果，删除失败只记录日志
pub trait CleanupSchedulerPort: Send + Sync {
    /// 在延迟之后删除文件，不阻塞调用方
    ///
    /// 同一路径已有待执行的删除时，旧的计时器被取消，以最近一次调度为准
    fn schedule(&self, path: PathBuf);

    /// 取消待执行的删除，存在时返回 true
    fn cancel(&self, path: &Path) -> bool;

    /// 待执行删除的数量
    fn pending(&self) -> usize;

    /// 删除延迟
    fn delay(&self) -> Duration;
}
