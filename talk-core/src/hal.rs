//! Hardware seam: time types, switch input wrappers and collaborator traits
//!
//! Physical debouncing, display rendering, speech synthesis and persistence
//! all live behind the traits in this module; the engine core never talks
//! to hardware directly.

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock instant type for compilation without embassy-time
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Instant(u64);

    impl Instant {
        pub fn now() -> Self {
            Self(0) // Placeholder implementation
        }

        pub fn from_millis(ms: i64) -> Self {
            Self(ms as u64)
        }

        pub fn duration_since(&self, other: Instant) -> Duration {
            Duration::from_millis(self.0.saturating_sub(other.0))
        }

        pub fn as_millis(&self) -> u64 {
            self.0
        }
    }

    /// Mock duration type
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub fn as_millis(&self) -> u64 {
            self.0
        }
    }

    impl core::ops::Div<u32> for Duration {
        type Output = Duration;

        fn div(self, rhs: u32) -> Duration {
            Duration(self.0 / rhs as u64)
        }
    }

    impl core::ops::Mul<u32> for Duration {
        type Output = Duration;

        fn mul(self, rhs: u32) -> Duration {
            Duration(self.0 * rhs as u64)
        }
    }
}

use crate::params::ParamError;
use crate::records::RecordError;
use embedded_hal::digital::InputPin;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO operation failed
    GpioError,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

/// Trait for user switch input handling
pub trait InputSwitch {
    type Error: From<HalError>;

    /// Check if the switch is currently pressed
    fn is_pressed(&mut self) -> Result<bool, Self::Error>;

    /// Get timestamp of last edge transition
    fn last_edge_time(&self) -> Option<Instant>;

    /// Configure debounce time
    fn set_debounce_time(&mut self, time_ms: u32) -> Result<(), Self::Error>;
}

/// Display collaborator: receives decoded characters and buffer snapshots
pub trait TextDisplay {
    /// One character was decoded from a pulse sequence
    fn char_decoded(&mut self, c: char);

    /// The visible text changed (append, backspace, compaction)
    fn text_updated(&mut self, text: &str);

    /// A status line (parameter listing, confirmations)
    fn status_line(&mut self, line: &str);
}

/// Speech collaborator: receives completed words and messages
pub trait SpeechTrigger {
    fn speak(&mut self, text: &str);
}

/// Diagnostics collaborator: receives non-fatal faults
///
/// Lookups themselves return plain results; reporting a miss is always
/// the caller's job, never the table's.
pub trait Diagnostics {
    /// A pulse-sequence key had no code-table entry
    fn code_miss(&mut self, key: u32);

    /// A short-code token had no table entry
    fn shortcode_miss(&mut self, token: &str);

    /// A parameter edit was rejected
    fn param_rejected(&mut self, err: &ParamError);

    /// A definition record could not be parsed
    fn record_rejected(&mut self, err: &RecordError);

    /// A bounded container refused an operation
    fn capacity_exceeded(&mut self, what: &'static str);

    /// A loaded field was truncated to fit its bound
    fn truncated(&mut self, what: &'static str);
}

/// Everything the engine hands results to, as one object
pub trait Collaborators: TextDisplay + SpeechTrigger + Diagnostics {}

impl<T: TextDisplay + SpeechTrigger + Diagnostics> Collaborators for T {}

/// Generic implementation for embedded-hal compatible pins
pub struct EmbeddedHalSwitch<P> {
    pin: P,
    last_edge: Option<Instant>,
    debounce_ms: u32,
}

impl<P> EmbeddedHalSwitch<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_edge: None,
            debounce_ms: 50,
        }
    }

    /// Update edge time (called from interrupt handler)
    pub fn update_edge_time(&mut self, time: Instant) {
        self.last_edge = Some(time);
    }
}

impl<P> InputSwitch for EmbeddedHalSwitch<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn is_pressed(&mut self) -> Result<bool, Self::Error> {
        // Active low (pulled up, grounded when pressed)
        self.pin.is_low().map_err(|_| HalError::GpioError)
    }

    fn last_edge_time(&self) -> Option<Instant> {
        self.last_edge
    }

    fn set_debounce_time(&mut self, time_ms: u32) -> Result<(), Self::Error> {
        if time_ms > 100 {
            return Err(HalError::InvalidConfig);
        }
        self.debounce_ms = time_ms;
        Ok(())
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::RefCell;
    use heapless::{String, Vec};

    #[derive(Default)]
    pub struct MockSwitch {
        pressed: RefCell<bool>,
        last_edge: RefCell<Option<Instant>>,
        debounce_ms: RefCell<u32>,
    }

    impl MockSwitch {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_pressed(&self, pressed: bool) {
            *self.pressed.borrow_mut() = pressed;
            if pressed {
                *self.last_edge.borrow_mut() = Some(Instant::now());
            }
        }
    }

    impl InputSwitch for MockSwitch {
        type Error = HalError;

        fn is_pressed(&mut self) -> Result<bool, Self::Error> {
            Ok(*self.pressed.borrow())
        }

        fn last_edge_time(&self) -> Option<Instant> {
            *self.last_edge.borrow()
        }

        fn set_debounce_time(&mut self, time_ms: u32) -> Result<(), Self::Error> {
            *self.debounce_ms.borrow_mut() = time_ms;
            Ok(())
        }
    }

    /// Recording collaborator set for pipeline tests
    #[derive(Default)]
    pub struct RecordingSinks {
        pub chars: Vec<char, 64>,
        pub last_text: String<256>,
        pub status: Vec<String<64>, 16>,
        pub spoken: Vec<String<4096>, 16>,
        pub code_misses: Vec<u32, 16>,
        pub shortcode_misses: Vec<String<16>, 8>,
        pub param_rejections: usize,
        pub record_rejections: usize,
        pub capacity_events: usize,
        pub truncations: usize,
    }

    impl RecordingSinks {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl TextDisplay for RecordingSinks {
        fn char_decoded(&mut self, c: char) {
            let _ = self.chars.push(c);
        }

        fn text_updated(&mut self, text: &str) {
            self.last_text.clear();
            let _ = self.last_text.push_str(text);
        }

        fn status_line(&mut self, line: &str) {
            let mut s = String::new();
            let _ = s.push_str(line);
            let _ = self.status.push(s);
        }
    }

    impl SpeechTrigger for RecordingSinks {
        fn speak(&mut self, text: &str) {
            let mut s = String::new();
            let _ = s.push_str(text);
            let _ = self.spoken.push(s);
        }
    }

    impl Diagnostics for RecordingSinks {
        fn code_miss(&mut self, key: u32) {
            let _ = self.code_misses.push(key);
        }

        fn shortcode_miss(&mut self, token: &str) {
            let mut s = String::new();
            let _ = s.push_str(token);
            let _ = self.shortcode_misses.push(s);
        }

        fn param_rejected(&mut self, _err: &ParamError) {
            self.param_rejections += 1;
        }

        fn record_rejected(&mut self, _err: &RecordError) {
            self.record_rejections += 1;
        }

        fn capacity_exceeded(&mut self, _what: &'static str) {
            self.capacity_events += 1;
        }

        fn truncated(&mut self, _what: &'static str) {
            self.truncations += 1;
        }
    }
}
