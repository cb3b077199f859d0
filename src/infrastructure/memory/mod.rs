//! Memory Layer - In-Memory State Management
//!
//! 实现 CleanupScheduler，在内存中登记待执行的延迟删除

mod cleanup_scheduler;

pub use cleanup_scheduler::DelayedCleanupScheduler;
