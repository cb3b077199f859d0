//! Synthesis Context - Value Objects

use std::path::Path;

use super::errors::ValidationError;
use crate::domain::voice::Voice;

/// 默认输出格式
pub const DEFAULT_FORMAT: &str = "mp3";

/// 输出文件名（仅保留 stem）
///
/// 不变量:
/// - 非空
/// - 不含目录分隔符，也不含最后一段扩展名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName(String);

impl OutputName {
    /// 从客户端传入的 `saida` 提取文件名 stem
    ///
    /// `../../etc/passwd.mp3` -> `passwd`，`a.tar.gz` -> `a.tar`
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Path::new(raw)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(|stem| Self(stem.to_string()))
            .ok_or(ValidationError::InvalidOutputName)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OutputName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音频容器/编码标记，例如 `mp3`、`wav`
///
/// 不做白名单校验，由外部引擎决定是否支持；
/// 只要求 ASCII 字母数字，因为它会拼进输出路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFormat(String);

impl AudioFormat {
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        let format = match raw {
            Some(value) if !value.is_empty() => value.to_lowercase(),
            _ => return Ok(Self::default()),
        };

        if !format.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidFormat(format));
        }

        Ok(Self(format))
    }

    pub fn extension(&self) -> &str {
        &self.0
    }

    /// `audio/{format}`
    pub fn content_type(&self) -> String {
        format!("audio/{}", self.0)
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self(DEFAULT_FORMAT.to_string())
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 通过校验的合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub output_name: OutputName,
    pub voice: Voice,
    pub encode_base64: bool,
    pub format: AudioFormat,
}

impl SynthesisRequest {
    /// 产物文件名 `{output_name}.{format}`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.output_name, self.format)
    }
}
