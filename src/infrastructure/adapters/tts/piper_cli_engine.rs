//! Piper CLI Engine - 以子进程方式调用 piper
//!
//! 实现 TtsEnginePort trait
//!
//! 调用方式:
//! `piper [extra_args...] --model <model_id> [--data-dir <dir>] --output_file <path>`
//! 文本通过 stdin 传入，不放在命令行参数里（避免长度限制和注入）

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::application::ports::{GeneratedArtifact, SynthesisJob, TtsEnginePort, TtsError};

/// Piper CLI 配置
#[derive(Debug, Clone)]
pub struct PiperCliConfig {
    /// piper 可执行文件
    pub bin: PathBuf,
    /// 模型目录，传给 `--data-dir`
    pub data_dir: Option<PathBuf>,
    /// 放在 `--model` 之前的附加参数
    pub extra_args: Vec<String>,
    /// 单次合成超时
    pub timeout: Duration,
    /// 同时运行的 piper 进程上限，0 表示不限制
    pub max_concurrent: usize,
}

impl Default for PiperCliConfig {
    fn default() -> Self {
        Self {
            bin: PathBuf::from("piper"),
            data_dir: None,
            extra_args: Vec::new(),
            timeout: Duration::from_secs(300),
            max_concurrent: 0,
        }
    }
}

/// Piper CLI 引擎
pub struct PiperCliEngine {
    config: PiperCliConfig,
    limiter: Option<Arc<Semaphore>>,
}

impl PiperCliEngine {
    pub fn new(config: PiperCliConfig) -> Self {
        let limiter = (config.max_concurrent > 0)
            .then(|| Arc::new(Semaphore::new(config.max_concurrent)));

        tracing::info!(
            bin = %config.bin.display(),
            max_concurrent = config.max_concurrent,
            timeout_secs = config.timeout.as_secs(),
            "PiperCliEngine initialized"
        );

        Self { config, limiter }
    }

    fn build_command(&self, job: &SynthesisJob) -> Command {
        let mut cmd = Command::new(&self.config.bin);
        cmd.args(&self.config.extra_args);
        cmd.arg("--model").arg(&job.model_id);
        if let Some(dir) = &self.config.data_dir {
            cmd.arg("--data-dir").arg(dir);
        }
        cmd.arg("--output_file").arg(&job.output_path);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        // 超时后 future 被丢弃，子进程随之被杀掉
        cmd.kill_on_drop(true);
        cmd
    }

    async fn run(&self, job: &SynthesisJob) -> Result<(), TtsError> {
        let mut cmd = self.build_command(job);
        tracing::debug!(command = ?cmd, text_len = job.text.len(), "Running piper");

        let mut child = cmd.spawn().map_err(|e| {
            TtsError::Spawn(format!("{}: {}", self.config.bin.display(), e))
        })?;

        // 写 stdin 与读取 stdout/stderr 并发进行，避免管道缓冲区写满后互相等待
        let stdin = child.stdin.take();
        let text = job.text.as_bytes();
        let write_input = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(text).await?;
                stdin.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (written, output) = tokio::join!(write_input, child.wait_with_output());
        let output = output.map_err(|e| TtsError::IoError(e.to_string()))?;

        if !output.status.success() {
            return Err(TtsError::ProcessFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        // 进程成功退出但 stdin 没写完，说明文本没有被完整读取
        written.map_err(|e| TtsError::IoError(format!("Failed to write text to piper: {}", e)))
    }
}

#[async_trait]
impl TtsEnginePort for PiperCliEngine {
    async fn synthesize(&self, job: SynthesisJob) -> Result<GeneratedArtifact, TtsError> {
        let _permit = match &self.limiter {
            Some(limiter) => Some(
                limiter
                    .clone()
                    .acquire_owned()
                    .await
                    .map_err(|e| TtsError::Spawn(e.to_string()))?,
            ),
            None => None,
        };

        tokio::time::timeout(self.config.timeout, self.run(&job))
            .await
            .map_err(|_| TtsError::Timeout(self.config.timeout))??;

        let metadata = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| TtsError::MissingOutput(job.output_path.display().to_string()))?;

        Ok(GeneratedArtifact {
            path: job.output_path,
            size_bytes: metadata.len(),
        })
    }
}
