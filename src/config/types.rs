//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 鉴权配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 产物存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 合成引擎配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 鉴权配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// `x-api-key` 共享密钥
    #[serde(default)]
    pub api_key: Option<String>,
}

/// 产物存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 音频输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 产物保留时间（分钟）
    #[serde(default = "default_delete_after_minutes")]
    pub delete_after_minutes: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("/app/output")
}

pub(crate) fn default_delete_after_minutes() -> u64 {
    30
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            delete_after_minutes: default_delete_after_minutes(),
        }
    }
}

impl StorageConfig {
    /// 删除延迟
    pub fn delete_after(&self) -> Duration {
        Duration::from_secs(self.delete_after_minutes.saturating_mul(60))
    }
}

/// 合成引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// piper 可执行文件
    #[serde(default = "default_piper_bin")]
    pub piper_bin: PathBuf,

    /// 模型目录（`--data-dir`），不设置时由 piper 自行查找
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// 额外的命令行参数
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// 单次合成超时（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 同时运行的合成进程上限，0 表示不限制
    #[serde(default)]
    pub max_concurrent: usize,

    /// 文本最大字符数
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_piper_bin() -> PathBuf {
    PathBuf::from("piper")
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_max_chars() -> usize {
    100_000
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            piper_bin: default_piper_bin(),
            data_dir: None,
            extra_args: Vec::new(),
            timeout_secs: default_timeout_secs(),
            max_concurrent: 0,
            max_chars: default_max_chars(),
        }
    }
}

impl SynthesisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
