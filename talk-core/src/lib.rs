#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Talk Core
//!
//! Decode-and-assembly engine for a switch-actuated assistive
//! communication device: timed pulses become characters, characters
//! become words, words become spoken messages. no_std, fixed capacity,
//! single-task.

pub mod codes;
pub mod engine;
pub mod hal;
pub mod input;
pub mod message;
pub mod params;
pub mod pulses;
pub mod records;
pub mod shortcodes;
pub mod types;
pub mod word;


pub use codes::{CodeEntry, CodeTable};
pub use engine::{Command, Engine, EngineError, KeyEvent};
pub use hal::{Collaborators, Diagnostics, Duration, Instant, SpeechTrigger, TextDisplay};
pub use input::SwitchInput;
pub use message::MessageHistory;
pub use params::{ParamError, ParamId, ParameterTable};
pub use pulses::PulseSequence;
pub use records::{LoadError, LoadReport, Record, RecordError};
pub use shortcodes::ShortcodeTable;
pub use types::*;
pub use word::WordBuffer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration for single-switch operation
pub fn default_config() -> EngineConfig {
    EngineConfig {
        switch_mode: SwitchMode::OneSwitch,
        debounce_ms: 50,
        compact_threshold: 160,
    }
}
