//! 应用层 - 命令
//!
//! 合成请求的用例编排

mod synthesis_commands;

pub mod handlers;

pub use synthesis_commands::*;
