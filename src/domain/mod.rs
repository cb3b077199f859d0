//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Synthesis Context: 合成请求校验与规范化
//! - Voice Context: 音色注册表

pub mod synthesis;
pub mod voice;
