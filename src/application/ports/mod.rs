//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod artifact_store;
mod cleanup_scheduler;
mod tts_engine;

pub use artifact_store::{ArtifactStoreError, ArtifactStorePort};
pub use cleanup_scheduler::CleanupSchedulerPort;
pub use tts_engine::{GeneratedArtifact, SynthesisJob, TtsEnginePort, TtsError};
