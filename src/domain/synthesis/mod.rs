//! Synthesis Context - 语音合成限界上下文
//!
//! 职责:
//! - 请求体解析与校验（错误累积）
//! - 输出文件名净化，防止路径穿越
//! - 输出格式规范化

mod errors;
mod request;
mod value_objects;

pub use errors::{ValidationError, ValidationErrors};
pub use request::RawSynthesisRequest;
pub use value_objects::{AudioFormat, OutputName, SynthesisRequest, DEFAULT_FORMAT};
