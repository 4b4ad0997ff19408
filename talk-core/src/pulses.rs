//! Pulse sequence: the dot/dash stack for the character being entered

use crate::types::{Pulse, StoreError};
use heapless::Vec;

/// Bounded stack of pulses, cleared after each character resolves
#[derive(Debug, Default)]
pub struct PulseSequence<const N: usize> {
    pulses: Vec<Pulse, N>,
}

impl<const N: usize> PulseSequence<N> {
    pub const fn new() -> Self {
        Self { pulses: Vec::new() }
    }

    /// Append one pulse; a full sequence rejects the push rather than
    /// dropping it silently
    pub fn push(&mut self, pulse: Pulse) -> Result<usize, StoreError> {
        self.pulses
            .push(pulse)
            .map_err(|_| StoreError::CapacityExceeded)?;
        Ok(self.pulses.len())
    }

    /// Remove the most recent pulse (mid-character correction)
    pub fn pop(&mut self) -> Option<Pulse> {
        self.pulses.pop()
    }

    pub fn clear(&mut self) {
        self.pulses.clear();
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Numeric key for the code table: pulses become decimal digits in
    /// push order, first pushed most significant. `[dot, dash]` is 12.
    ///
    /// The digit order and the dot=1/dash=2 encoding are fixed for
    /// compatibility with externally supplied code tables.
    pub fn value(&self) -> u32 {
        self.pulses
            .iter()
            .fold(0, |acc, p| acc * 10 + p.digit())
    }
}
