//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、ArtifactStore、CleanupScheduler）
//! - commands: 合成命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{handlers::SynthesizeAudioHandler, AudioPayload, SynthesizeAudio};

pub use error::ApplicationError;

pub use ports::{
    // Artifact store
    ArtifactStoreError,
    ArtifactStorePort,
    // Cleanup scheduler
    CleanupSchedulerPort,
    // TTS engine
    GeneratedArtifact,
    SynthesisJob,
    TtsEnginePort,
    TtsError,
};
