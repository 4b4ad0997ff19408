//! Timing parameter table: factory values plus validated user overrides
//!
//! Every edit is checked against the parameter's `[min, max]` range and a
//! maximum change rate before it is committed; rejected edits leave the
//! table untouched and carry the reason back to the caller.

use core::fmt::Write;

use crate::types::StoreError;
use heapless::String;

/// Number of recognized timing parameters
pub const NPARAMS: usize = 6;

/// Maximum percent a single edit may move a value, relative to the
/// current value
pub const DEFAULT_MAX_CHANGE_PERCENT: u32 = 10;

/// Named timing parameters
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamId {
    /// Dot unit length, ms
    DotUnit,
    /// Dash length as a multiple of the dot unit
    DashMultiplier,
    /// Gap between pulses of one character, ms
    IntraGap,
    /// Gap that ends a character, ms
    CharGap,
    /// Gap that ends a word, ms
    WordGap,
    /// Held time that makes a one-switch press a dash, ms
    LongPress,
}

impl ParamId {
    pub const ALL: [ParamId; NPARAMS] = [
        ParamId::DotUnit,
        ParamId::DashMultiplier,
        ParamId::IntraGap,
        ParamId::CharGap,
        ParamId::WordGap,
        ParamId::LongPress,
    ];

    /// Two-letter name used in definition records and the user blob
    pub const fn name(&self) -> &'static str {
        match self {
            ParamId::DotUnit => "du",
            ParamId::DashMultiplier => "da",
            ParamId::IntraGap => "ig",
            ParamId::CharGap => "cg",
            ParamId::WordGap => "wg",
            ParamId::LongPress => "lp",
        }
    }

    pub fn from_name(name: &str) -> Option<ParamId> {
        let nb = name.as_bytes();
        if nb.len() != 2 {
            return None;
        }
        let lower = [nb[0].to_ascii_lowercase(), nb[1].to_ascii_lowercase()];
        ParamId::ALL
            .into_iter()
            .find(|id| id.name().as_bytes() == lower)
    }

    const fn index(&self) -> usize {
        match self {
            ParamId::DotUnit => 0,
            ParamId::DashMultiplier => 1,
            ParamId::IntraGap => 2,
            ParamId::CharGap => 3,
            ParamId::WordGap => 4,
            ParamId::LongPress => 5,
        }
    }
}

/// Hard bounds for each parameter, in table order
const BOUNDS: [(u32, u32); NPARAMS] = [
    (50, 2000),   // du
    (2, 5),       // da
    (50, 2000),   // ig
    (200, 5000),  // cg
    (500, 10000), // wg
    (200, 2000),  // lp
];

/// Factory defaults, in table order
const FACTORY: [u32; NPARAMS] = [200, 3, 200, 1000, 2000, 500];

/// Why a parameter edit was refused
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamError {
    /// Name is not a recognized timing parameter
    UnknownParameter,
    /// Value is outside the parameter's hard limits
    OutOfRange { value: u32, min: u32, max: u32 },
    /// Edit moves the value further than the max change rate allows
    ChangeTooLarge { value: u32, current: u32 },
    /// Undo requested with no edit on record
    NothingToUndo,
}

#[cfg(feature = "std")]
impl core::fmt::Display for ParamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParamError::UnknownParameter => write!(f, "unknown parameter"),
            ParamError::OutOfRange { value, min, max } => {
                write!(f, "{value} outside [{min}, {max}]")
            }
            ParamError::ChangeTooLarge { value, current } => {
                write!(f, "{value} changes {current} by more than the allowed rate")
            }
            ParamError::NothingToUndo => write!(f, "no parameter edit to undo"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

/// Per-line outcome counts for [`ParameterTable::apply_user_blob`]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct BlobReport {
    pub applied: usize,
    pub rejected: usize,
}

/// Factory table plus one layer of user overrides
#[derive(Debug)]
pub struct ParameterTable {
    factory: [u32; NPARAMS],
    values: [u32; NPARAMS],
    last_edit: Option<(ParamId, u32)>,
    max_change_percent: u32,
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterTable {
    pub const fn new() -> Self {
        Self {
            factory: FACTORY,
            values: FACTORY,
            last_edit: None,
            max_change_percent: DEFAULT_MAX_CHANGE_PERCENT,
        }
    }

    /// Replace one factory value from a definition record.
    ///
    /// Definition-stream values become both the factory value and the
    /// live value; the user-override blob is applied afterwards.
    pub fn load(&mut self, name: &str, value: u32) -> Result<(), ParamError> {
        let id = ParamId::from_name(name).ok_or(ParamError::UnknownParameter)?;
        let (min, max) = BOUNDS[id.index()];
        if value < min || value > max {
            return Err(ParamError::OutOfRange { value, min, max });
        }
        self.factory[id.index()] = value;
        self.values[id.index()] = value;
        Ok(())
    }

    pub fn get(&self, id: ParamId) -> u32 {
        self.values[id.index()]
    }

    pub fn get_by_name(&self, name: &str) -> Option<u32> {
        ParamId::from_name(name).map(|id| self.get(id))
    }

    /// Validated edit: rejected when outside `[min, max]` or when the
    /// change from the current value exceeds the max change rate.
    pub fn set(&mut self, id: ParamId, value: u32) -> Result<(), ParamError> {
        let (min, max) = BOUNDS[id.index()];
        if value < min || value > max {
            return Err(ParamError::OutOfRange { value, min, max });
        }

        let current = self.values[id.index()];
        if current > 0 {
            let delta = current.abs_diff(value);
            if delta * 100 > current * self.max_change_percent {
                return Err(ParamError::ChangeTooLarge { value, current });
            }
        }

        self.last_edit = Some((id, current));
        self.values[id.index()] = value;
        Ok(())
    }

    /// Revert the most recent accepted edit
    pub fn undo(&mut self) -> Result<(ParamId, u32), ParamError> {
        let (id, previous) = self.last_edit.take().ok_or(ParamError::NothingToUndo)?;
        self.values[id.index()] = previous;
        Ok((id, previous))
    }

    /// Discard all user overrides, restoring load-time factory values
    pub fn reset_to_factory(&mut self) {
        self.values = self.factory;
        self.last_edit = None;
    }

    /// Zero the whole table. Pre-load step only, never mid-session.
    pub fn clear(&mut self) {
        self.factory = [0; NPARAMS];
        self.values = [0; NPARAMS];
        self.last_edit = None;
    }

    /// Apply a persisted `name=value` override blob on top of the factory
    /// values. Each line is validated against the hard limits only; bad
    /// lines are rejected individually and counted.
    pub fn apply_user_blob(&mut self, blob: &str) -> BlobReport {
        let mut report = BlobReport::default();
        for line in blob.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                report.rejected += 1;
                continue;
            };
            let Ok(value) = value.trim().parse::<u32>() else {
                report.rejected += 1;
                continue;
            };
            let Some(id) = ParamId::from_name(name.trim()) else {
                report.rejected += 1;
                continue;
            };
            let (min, max) = BOUNDS[id.index()];
            if value < min || value > max {
                report.rejected += 1;
                continue;
            }
            self.values[id.index()] = value;
            report.applied += 1;
        }
        report
    }

    /// Serialize the current values as a `name=value` blob for the
    /// persistence collaborator
    pub fn write_user_blob<const M: usize>(
        &self,
        out: &mut String<M>,
    ) -> Result<(), StoreError> {
        for id in ParamId::ALL {
            writeln!(out, "{}={}", id.name(), self.get(id))
                .map_err(|_| StoreError::CapacityExceeded)?;
        }
        Ok(())
    }

    /// Iterate `(id, current value)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, u32)> + '_ {
        ParamId::ALL.into_iter().map(|id| (id, self.get(id)))
    }
}
