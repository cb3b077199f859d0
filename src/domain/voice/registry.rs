//! Voice Context - Registry
//!
//! 音色 key 与 piper 模型标识的静态映射，进程启动后不可变

/// 默认音色 key
pub const DEFAULT_VOICE_KEY: &str = "faber";

/// 内置音色表（顺序即对外展示顺序）
const BUILTIN_VOICES: &[(&str, &str)] = &[
    ("faber", "pt_BR-faber-medium"),
    ("edresson", "pt_BR-edresson-low"),
];

/// 已解析的音色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// 短 key，例如 `faber`
    pub key: String,
    /// 传给 `--model` 的模型标识
    pub model_id: String,
}

/// 音色注册表
///
/// 不变量:
/// - key 全部为小写且唯一
/// - 顺序稳定，错误信息按注册顺序列出可选项
#[derive(Debug, Clone)]
pub struct VoiceRegistry {
    entries: Vec<Voice>,
}

impl VoiceRegistry {
    /// 内置注册表
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_VOICES
                .iter()
                .map(|(key, model_id)| Voice {
                    key: (*key).to_string(),
                    model_id: (*model_id).to_string(),
                })
                .collect(),
        }
    }

    /// 按 key 查找（忽略大小写）
    pub fn resolve(&self, key: &str) -> Option<&Voice> {
        let key = key.to_lowercase();
        self.entries.iter().find(|voice| voice.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|voice| voice.key.as_str())
    }

    /// 可选项列表，例如 `faber, edresson`
    pub fn options_label(&self) -> String {
        self.keys().collect::<Vec<_>>().join(", ")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VoiceRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = VoiceRegistry::builtin();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.options_label(), "faber, edresson");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = VoiceRegistry::builtin();
        let voice = registry.resolve("EdResson").unwrap();
        assert_eq!(voice.key, "edresson");
        assert_eq!(voice.model_id, "pt_BR-edresson-low");
    }

    #[test]
    fn test_resolve_unknown_voice() {
        let registry = VoiceRegistry::builtin();
        assert!(registry.resolve("invalida").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_default_key_is_registered() {
        let registry = VoiceRegistry::builtin();
        assert!(registry.resolve(DEFAULT_VOICE_KEY).is_some());
    }
}
