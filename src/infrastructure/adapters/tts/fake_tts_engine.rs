//! Fake TTS Engine - 用于测试的 TTS 引擎
//!
//! 不启动任何进程，直接把固定的音频字节写到输出路径

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{GeneratedArtifact, SynthesisJob, TtsEnginePort, TtsError};

/// Fake TTS Engine
///
/// 记录收到的所有任务，便于断言引擎是否被调用
pub struct FakeTtsEngine {
    /// 成功时写出的音频数据
    audio_data: Vec<u8>,
    /// 设置后模拟进程失败，内容作为 stderr
    failure: Option<String>,
    /// 失败前写出的半成品
    partial_output: Option<Vec<u8>>,
    jobs: Mutex<Vec<SynthesisJob>>,
}

impl FakeTtsEngine {
    /// 总是成功，输出给定音频
    pub fn new(audio_data: Vec<u8>) -> Self {
        Self {
            audio_data,
            failure: None,
            partial_output: None,
            jobs: Mutex::new(Vec::new()),
        }
    }

    /// 总是以非零状态失败
    pub fn failing(stderr: impl Into<String>) -> Self {
        Self {
            failure: Some(stderr.into()),
            ..Self::new(Vec::new())
        }
    }

    /// 失败前先写出半成品文件
    pub fn with_partial_output(mut self, data: Vec<u8>) -> Self {
        self.partial_output = Some(data);
        self
    }

    /// 已收到的任务
    pub fn jobs(&self) -> Vec<SynthesisJob> {
        self.jobs.lock().map(|jobs| jobs.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsEngine {
    async fn synthesize(&self, job: SynthesisJob) -> Result<GeneratedArtifact, TtsError> {
        tracing::debug!(
            text_len = job.text.len(),
            model_id = %job.model_id,
            "FakeTtsEngine: returning fixed audio"
        );

        if let Ok(mut jobs) = self.jobs.lock() {
            jobs.push(job.clone());
        }

        if let Some(stderr) = &self.failure {
            if let Some(partial) = &self.partial_output {
                tokio::fs::write(&job.output_path, partial)
                    .await
                    .map_err(|e| TtsError::IoError(e.to_string()))?;
            }
            return Err(TtsError::ProcessFailed {
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            });
        }

        tokio::fs::write(&job.output_path, &self.audio_data)
            .await
            .map_err(|e| TtsError::IoError(e.to_string()))?;

        Ok(GeneratedArtifact {
            path: job.output_path,
            size_bytes: self.audio_data.len() as u64,
        })
    }
}
