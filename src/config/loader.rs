//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 部署沿用的环境变量 `API_KEY`、`DELETE_FILE_MINUTES`
//! 2. 环境变量（前缀 `FALANTE_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{default_delete_after_minutes, AppConfig};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 不带前缀的环境变量
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    /// `API_KEY`
    pub api_key: Option<String>,
    /// `DELETE_FILE_MINUTES`，原样保留以便在无效时给出警告
    pub delete_file_minutes: Option<String>,
}

impl LegacyEnv {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("API_KEY").ok(),
            delete_file_minutes: std::env::var("DELETE_FILE_MINUTES").ok(),
        }
    }
}

/// 加载结果
///
/// 日志系统依赖配置初始化，加载期间的警告先收集起来，初始化后再输出
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub warnings: Vec<String>,
}

/// 加载应用配置
///
/// # 环境变量示例
/// - `API_KEY=secret`
/// - `DELETE_FILE_MINUTES=30`
/// - `FALANTE_SERVER__PORT=5000`
/// - `FALANTE_STORAGE__OUTPUT_DIR=/app/output`
/// - `FALANTE_SYNTHESIS__PIPER_BIN=/usr/local/bin/piper`
/// - `FALANTE_SYNTHESIS__EXTRA_ARGS="--sentence_silence 0.2"`
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    load_config_from_path(None, LegacyEnv::from_env())
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
/// - `legacy` - 不带前缀的环境变量
pub fn load_config_from_path(
    config_path: Option<&Path>,
    legacy: LegacyEnv,
) -> Result<LoadedConfig, ConfigError> {
    let mut warnings = Vec::new();
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("storage.output_dir", "/app/output")?
        .set_default(
            "storage.delete_after_minutes",
            default_delete_after_minutes() as i64,
        )?
        .set_default("synthesis.piper_bin", "piper")?
        .set_default("synthesis.timeout_secs", 300)?
        .set_default("synthesis.max_concurrent", 0)?
        .set_default("synthesis.max_chars", 100_000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 带前缀的环境变量
    // 例如: FALANTE_SYNTHESIS__MAX_CONCURRENT=4
    builder = builder.add_source(
        Environment::with_prefix("FALANTE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(" ")
            .with_list_parse_key("synthesis.extra_args"),
    );

    // 4. 不带前缀的环境变量（最高优先级）
    if let Some(api_key) = legacy.api_key {
        builder = builder.set_override("auth.api_key", api_key)?;
    }
    if let Some(raw) = legacy.delete_file_minutes {
        let minutes = match raw.trim().parse::<i64>() {
            Ok(minutes) if minutes >= 0 => minutes,
            _ => {
                let fallback = default_delete_after_minutes();
                warnings.push(format!(
                    "DELETE_FILE_MINUTES inválido ({:?}), usando {} minutos como padrão.",
                    raw, fallback
                ));
                fallback as i64
            }
        };
        builder = builder.set_override("storage.delete_after_minutes", minutes)?;
    }

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 空字符串等同于未配置
    if app_config.auth.api_key.as_deref() == Some("") {
        app_config.auth.api_key = None;
    }
    if app_config.auth.api_key.is_none() {
        warnings.push("API_KEY não configurada: todas as requisições a /audio serão recusadas.".to_string());
    }

    validate_config(&app_config)?;

    Ok(LoadedConfig {
        config: app_config,
        warnings,
    })
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.storage.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Output directory cannot be empty".to_string(),
        ));
    }

    if config.synthesis.piper_bin.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Piper binary cannot be empty".to_string(),
        ));
    }

    if config.synthesis.max_chars == 0 {
        return Err(ConfigError::ValidationError(
            "max_chars must be greater than 0".to_string(),
        ));
    }

    if config.synthesis.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Synthesis timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!(
        "API Key: {}",
        if config.auth.api_key.is_some() { "configured" } else { "missing" }
    );
    tracing::info!("Output Directory: {:?}", config.storage.output_dir);
    tracing::info!(
        "Delete Files After: {} minutes",
        config.storage.delete_after_minutes
    );
    tracing::info!("Piper Binary: {:?}", config.synthesis.piper_bin);
    if let Some(dir) = &config.synthesis.data_dir {
        tracing::info!("Piper Data Dir: {:?}", dir);
    }
    tracing::info!("Synthesis Timeout: {}s", config.synthesis.timeout_secs);
    if config.synthesis.max_concurrent > 0 {
        tracing::info!("Max Concurrent Synthesis: {}", config.synthesis.max_concurrent);
    } else {
        tracing::info!("Max Concurrent Synthesis: unlimited");
    }
    tracing::info!("Max Characters: {}", config.synthesis.max_chars);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn legacy(api_key: Option<&str>, minutes: Option<&str>) -> LegacyEnv {
        LegacyEnv {
            api_key: api_key.map(str::to_string),
            delete_file_minutes: minutes.map(str::to_string),
        }
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[server]
port = 8080

[storage]
output_dir = "/tmp/falante"

[synthesis]
max_concurrent = 2
extra_args = ["--sentence_silence", "0.2"]
"#,
        );

        let loaded = load_config_from_path(Some(file.path()), legacy(Some("secret"), None)).unwrap();
        let config = loaded.config;

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.output_dir, PathBuf::from("/tmp/falante"));
        assert_eq!(config.storage.delete_after_minutes, 30);
        assert_eq!(config.synthesis.max_concurrent, 2);
        assert_eq!(config.synthesis.extra_args, vec!["--sentence_silence", "0.2"]);
        assert_eq!(config.synthesis.max_chars, 100_000);
        assert_eq!(config.auth.api_key.as_deref(), Some("secret"));
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_legacy_delete_minutes() {
        let file = write_config("");
        let loaded =
            load_config_from_path(Some(file.path()), legacy(Some("k"), Some(" 5 "))).unwrap();
        assert_eq!(loaded.config.storage.delete_after_minutes, 5);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_invalid_delete_minutes_falls_back_with_warning() {
        let file = write_config("[storage]\ndelete_after_minutes = 10\n");

        for raw in ["abc", "-3", "1.5", ""] {
            let loaded =
                load_config_from_path(Some(file.path()), legacy(Some("k"), Some(raw))).unwrap();
            assert_eq!(loaded.config.storage.delete_after_minutes, 30);
            assert_eq!(loaded.warnings.len(), 1);
            assert!(loaded.warnings[0].contains("DELETE_FILE_MINUTES"));
        }
    }

    #[test]
    fn test_missing_api_key_warns() {
        let file = write_config("");
        let loaded = load_config_from_path(Some(file.path()), legacy(Some(""), None)).unwrap();
        assert!(loaded.config.auth.api_key.is_none());
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_output_dir() {
        let mut config = AppConfig::default();
        config.storage.output_dir = PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_max_chars() {
        let mut config = AppConfig::default();
        config.synthesis.max_chars = 0;
        assert!(validate_config(&config).is_err());
    }
}
