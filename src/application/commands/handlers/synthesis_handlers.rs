//! Synthesis Command Handlers

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::sync::Arc;

use crate::application::commands::{AudioPayload, SynthesizeAudio};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtifactStorePort, CleanupSchedulerPort, SynthesisJob, TtsEnginePort,
};
use crate::domain::voice::VoiceRegistry;

/// SynthesizeAudio Handler
///
/// 校验 -> 调用引擎 -> 生成响应形态 -> 调度延迟删除
pub struct SynthesizeAudioHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    artifact_store: Arc<dyn ArtifactStorePort>,
    cleanup_scheduler: Arc<dyn CleanupSchedulerPort>,
    voices: Arc<VoiceRegistry>,
    max_chars: usize,
}

impl SynthesizeAudioHandler {
    pub fn new(
        tts_engine: Arc<dyn TtsEnginePort>,
        artifact_store: Arc<dyn ArtifactStorePort>,
        cleanup_scheduler: Arc<dyn CleanupSchedulerPort>,
        voices: Arc<VoiceRegistry>,
        max_chars: usize,
    ) -> Self {
        Self {
            tts_engine,
            artifact_store,
            cleanup_scheduler,
            voices,
            max_chars,
        }
    }

    pub async fn handle(&self, command: SynthesizeAudio) -> Result<AudioPayload, ApplicationError> {
        let request = command.request.validate(&self.voices, self.max_chars)?;

        let file_name = request.file_name();
        let output_path = self.artifact_store.artifact_path(&file_name);

        let job = SynthesisJob {
            text: request.text,
            model_id: request.voice.model_id.clone(),
            output_path: output_path.clone(),
        };

        let artifact = match self.tts_engine.synthesize(job).await {
            Ok(artifact) => artifact,
            Err(e) => {
                // 引擎可能留下半成品
                if self.artifact_store.exists(&output_path).await {
                    self.cleanup_scheduler.schedule(output_path);
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            path = %artifact.path.display(),
            voice = %request.voice.key,
            size_bytes = artifact.size_bytes,
            "Audio generated"
        );

        // 先读取/打开文件，再调度删除，最后才处理读取错误
        let payload = if request.encode_base64 {
            let read = self.artifact_store.read(&artifact.path).await;
            self.cleanup_scheduler.schedule(artifact.path);
            AudioPayload::Base64 {
                audio: BASE64.encode(read?),
            }
        } else {
            let opened = self.artifact_store.open(&artifact.path).await;
            self.cleanup_scheduler.schedule(artifact.path);
            let (file, size_bytes) = opened?;
            AudioPayload::Stream {
                file,
                size_bytes,
                content_type: request.format.content_type(),
                file_name,
            }
        };

        Ok(payload)
    }
}
