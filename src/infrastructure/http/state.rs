//! Application State
//!
//! 启动时构建一次，之后只读共享

use std::sync::Arc;

use crate::application::{
    ArtifactStorePort, CleanupSchedulerPort, SynthesizeAudioHandler, TtsEnginePort,
};
use crate::domain::voice::VoiceRegistry;

/// 应用状态
pub struct AppState {
    /// 共享密钥，为 None 时所有受保护的请求都会被拒绝
    pub api_key: Option<String>,

    // ========== Ports ==========
    pub cleanup_scheduler: Arc<dyn CleanupSchedulerPort>,

    // ========== Command Handlers ==========
    pub synthesize_audio_handler: SynthesizeAudioHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        api_key: Option<String>,
        tts_engine: Arc<dyn TtsEnginePort>,
        artifact_store: Arc<dyn ArtifactStorePort>,
        cleanup_scheduler: Arc<dyn CleanupSchedulerPort>,
        voices: Arc<VoiceRegistry>,
        max_chars: usize,
    ) -> Self {
        Self {
            api_key,
            cleanup_scheduler: cleanup_scheduler.clone(),
            synthesize_audio_handler: SynthesizeAudioHandler::new(
                tts_engine,
                artifact_store,
                cleanup_scheduler,
                voices,
                max_chars,
            ),
        }
    }
}
