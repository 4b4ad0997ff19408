//! Core data types for the pulse decode engine

/// Pulse symbols produced by the input switches
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pulse {
    /// Short press
    Dot,
    /// Long press (or secondary switch)
    Dash,
}

impl Pulse {
    /// Decimal digit used in code-table keys (dot=1, dash=2)
    pub const fn digit(&self) -> u32 {
        match self {
            Pulse::Dot => 1,
            Pulse::Dash => 2,
        }
    }
}

/// Physical switch identification
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchId {
    /// Primary switch (dot in two-switch operation)
    Primary,
    /// Secondary switch (dash in two-switch operation)
    Secondary,
}

impl SwitchId {
    pub const fn index(&self) -> usize {
        match self {
            SwitchId::Primary => 0,
            SwitchId::Secondary => 1,
        }
    }
}

/// Switch operating modes
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchMode {
    /// Single switch: press length selects dot or dash
    OneSwitch,
    /// Two switches: switch identity selects dot or dash
    TwoSwitch,
}

/// Classification of an input gap against the timing parameters
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GapKind {
    /// Within a character, no boundary yet
    Intra,
    /// Inter-character gap, resolve the pulse sequence
    Character,
    /// Inter-word gap, commit the current token
    Word,
}

/// Errors from the bounded tables and buffers
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Table, stack or buffer is full; the operation was rejected whole
    CapacityExceeded,
    /// Load attempted after the table was frozen
    Frozen,
    /// Table was already frozen by an earlier call
    AlreadyFrozen,
}

#[cfg(feature = "std")]
impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::CapacityExceeded => write!(f, "capacity exceeded"),
            StoreError::Frozen => write!(f, "table is frozen"),
            StoreError::AlreadyFrozen => write!(f, "table was already frozen"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}

/// Rejected [`EngineConfig`] values
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Debounce time above 100 ms
    DebounceTooLong(u32),
    /// Compaction threshold below 40 or above the word-buffer capacity
    CompactThresholdOutOfRange(usize),
}

#[cfg(feature = "std")]
impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::DebounceTooLong(ms) => {
                write!(f, "debounce of {ms} ms is above the 100 ms limit")
            }
            ConfigError::CompactThresholdOutOfRange(len) => {
                write!(f, "compact threshold {len} outside [40, {WORD_TEXT}]")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Number of pulses a single character may hold
pub const MAX_PULSES: usize = 6;
/// Morse code table capacity
pub const MAX_MORSE_CODES: usize = 60;
/// Short-code table capacity
pub const MAX_SHORT_CODES: usize = 40;
/// Maximum short-code phrase length
pub const MAX_SHORT_TEXT: usize = 80;
/// Word buffer capacity
pub const WORD_TEXT: usize = 200;
/// Maximum completed words held in a message
pub const MAX_WORDS: usize = 40;
/// Maximum length of one message history entry
pub const MESSAGE_TEXT: usize = 100;

/// Engine configuration parameters
///
/// Timing values live in the [`ParameterTable`](crate::params::ParameterTable);
/// this struct carries the structural knobs fixed at build time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EngineConfig {
    /// Switch operating mode
    pub switch_mode: SwitchMode,
    /// Debounce time in milliseconds
    pub debounce_ms: u32,
    /// Word-buffer length that triggers compaction
    pub compact_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            switch_mode: SwitchMode::OneSwitch,
            debounce_ms: 50,
            compact_threshold: 160,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with validation
    pub fn new(
        switch_mode: SwitchMode,
        debounce_ms: u32,
        compact_threshold: usize,
    ) -> Result<Self, ConfigError> {
        if debounce_ms > 100 {
            return Err(ConfigError::DebounceTooLong(debounce_ms));
        }
        if compact_threshold < 40 || compact_threshold > WORD_TEXT {
            return Err(ConfigError::CompactThresholdOutOfRange(compact_threshold));
        }

        Ok(Self {
            switch_mode,
            debounce_ms,
            compact_threshold,
        })
    }
}
