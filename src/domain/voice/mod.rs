//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色 key 到 piper 模型的映射
//! - 音色查找（忽略大小写）

mod registry;

pub use registry::{Voice, VoiceRegistry, DEFAULT_VOICE_KEY};
