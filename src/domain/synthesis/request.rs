//! Synthesis Context - 请求解析与校验
//!
//! 客户端 JSON 字段名沿用对外接口：`texto`、`saida`、`voz`、`base64`、`formato`

use serde::{Deserialize, Deserializer};

use super::errors::{ValidationError, ValidationErrors};
use super::value_objects::{AudioFormat, OutputName, SynthesisRequest};
use crate::domain::voice::{VoiceRegistry, DEFAULT_VOICE_KEY};

/// 未校验的请求体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSynthesisRequest {
    #[serde(default, rename = "texto")]
    pub text: Option<String>,

    #[serde(default, rename = "saida")]
    pub output_name: Option<String>,

    #[serde(default, rename = "voz")]
    pub voice: Option<String>,

    /// 仅 `"true"`（忽略大小写）或 JSON `true` 视为开启，其余一律为 false
    #[serde(default, rename = "base64", deserialize_with = "deserialize_flag")]
    pub encode_base64: bool,

    #[serde(default, rename = "formato")]
    pub format: Option<String>,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s.eq_ignore_ascii_case("true"),
        serde_json::Value::Bool(b) => b,
        _ => false,
    })
}

impl RawSynthesisRequest {
    /// 校验并规范化
    ///
    /// 所有规则都会检查，错误累积返回而不是遇到第一个就中断
    pub fn validate(
        self,
        registry: &VoiceRegistry,
        max_chars: usize,
    ) -> Result<SynthesisRequest, ValidationErrors> {
        let mut errors = Vec::new();

        let text = self.text.filter(|t| !t.is_empty());
        let raw_output_name = self.output_name.filter(|o| !o.is_empty());
        if text.is_none() || raw_output_name.is_none() {
            errors.push(ValidationError::MissingRequired);
        }

        let voice_key = self.voice.as_deref().unwrap_or(DEFAULT_VOICE_KEY);
        let voice = registry.resolve(voice_key).cloned();
        if voice.is_none() {
            errors.push(ValidationError::UnknownVoice {
                options: registry.options_label(),
            });
        }

        if let Some(text) = &text {
            if text.chars().count() > max_chars {
                errors.push(ValidationError::TextTooLong { limit: max_chars });
            }
        }

        let output_name = match raw_output_name.as_deref().map(OutputName::parse) {
            Some(Ok(name)) => Some(name),
            Some(Err(e)) => {
                errors.push(e);
                None
            }
            None => None,
        };

        let format = match AudioFormat::parse(self.format.as_deref()) {
            Ok(format) => Some(format),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match (text, output_name, voice, format) {
            (Some(text), Some(output_name), Some(voice), Some(format)) if errors.is_empty() => {
                Ok(SynthesisRequest {
                    text,
                    output_name,
                    voice,
                    encode_base64: self.encode_base64,
                    format,
                })
            }
            // 任一字段缺失时上面都已记录对应错误
            _ => Err(ValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> RawSynthesisRequest {
        serde_json::from_value(json).unwrap()
    }

    fn validate(json: serde_json::Value) -> Result<SynthesisRequest, ValidationErrors> {
        raw(json).validate(&VoiceRegistry::builtin(), 100_000)
    }

    #[test]
    fn test_valid_request_with_defaults() {
        let request = validate(serde_json::json!({
            "texto": "Olá mundo",
            "saida": "teste"
        }))
        .unwrap();

        assert_eq!(request.text, "Olá mundo");
        assert_eq!(request.output_name.as_str(), "teste");
        assert_eq!(request.voice.key, "faber");
        assert_eq!(request.voice.model_id, "pt_BR-faber-medium");
        assert!(!request.encode_base64);
        assert_eq!(request.format.extension(), "mp3");
        assert_eq!(request.file_name(), "teste.mp3");
    }

    #[test]
    fn test_missing_text_and_output() {
        let errors = validate(serde_json::json!({})).unwrap_err();
        assert_eq!(errors.errors(), &[ValidationError::MissingRequired]);

        let errors = validate(serde_json::json!({ "texto": "", "saida": "x" })).unwrap_err();
        assert!(errors.contains(&ValidationError::MissingRequired));
    }

    #[test]
    fn test_unknown_voice_lists_options() {
        let errors = validate(serde_json::json!({
            "texto": "Olá",
            "saida": "teste",
            "voz": "invalida"
        }))
        .unwrap_err();

        assert_eq!(errors.to_string(), "Voz inválida. Opções: faber, edresson");
    }

    #[test]
    fn test_voice_is_case_insensitive() {
        let request = validate(serde_json::json!({
            "texto": "Olá",
            "saida": "teste",
            "voz": "EDRESSON"
        }))
        .unwrap();
        assert_eq!(request.voice.model_id, "pt_BR-edresson-low");
    }

    #[test]
    fn test_text_limit_counts_characters() {
        let registry = VoiceRegistry::builtin();

        // 5 个字符，但 UTF-8 下超过 5 字节
        let ok = raw(serde_json::json!({ "texto": "ãããõõ", "saida": "a" }))
            .validate(&registry, 5);
        assert!(ok.is_ok());

        let errors = raw(serde_json::json!({ "texto": "ãããõõé", "saida": "a" }))
            .validate(&registry, 5)
            .unwrap_err();
        assert_eq!(
            errors.errors(),
            &[ValidationError::TextTooLong { limit: 5 }]
        );
    }

    #[test]
    fn test_errors_accumulate() {
        let registry = VoiceRegistry::builtin();
        let errors = raw(serde_json::json!({
            "texto": "abcdef",
            "voz": "nope",
            "formato": "../x"
        }))
        .validate(&registry, 3)
        .unwrap_err();

        assert_eq!(errors.errors().len(), 4);
        assert!(errors.contains(&ValidationError::MissingRequired));
        assert!(errors.contains(&ValidationError::TextTooLong { limit: 3 }));
    }

    #[test]
    fn test_output_name_is_sanitized() {
        let request = validate(serde_json::json!({
            "texto": "Olá",
            "saida": "../../tmp/evil.sh",
            "formato": "WAV"
        }))
        .unwrap();
        assert_eq!(request.file_name(), "evil.wav");
    }

    #[test]
    fn test_base64_flag_parsing() {
        assert!(raw(serde_json::json!({ "base64": "true" })).encode_base64);
        assert!(raw(serde_json::json!({ "base64": "TRUE" })).encode_base64);
        assert!(raw(serde_json::json!({ "base64": true })).encode_base64);
        assert!(!raw(serde_json::json!({ "base64": "false" })).encode_base64);
        assert!(!raw(serde_json::json!({ "base64": "yes" })).encode_base64);
        assert!(!raw(serde_json::json!({ "base64": 1 })).encode_base64);
        assert!(!raw(serde_json::json!({})).encode_base64);
    }
}
