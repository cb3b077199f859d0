//! TTS Adapter - piper 命令行引擎实现

mod fake_tts_engine;
mod piper_cli_engine;

pub use fake_tts_engine::FakeTtsEngine;
pub use piper_cli_engine::{PiperCliConfig, PiperCliEngine};
