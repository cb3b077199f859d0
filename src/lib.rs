//! Falante - piper 语音合成 HTTP 服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Synthesis Context: 请求校验、输出文件名净化
//! - Voice Context: 音色注册表
//!
//! 应用层 (application/):
//! - Ports: TtsEngine, ArtifactStore, CleanupScheduler
//! - Commands: SynthesizeAudio 命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: POST /audio + API Key 中间件
//! - Adapters: piper 子进程引擎, 文件系统产物存储
//! - Memory: 延迟删除调度器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
