//! Definition-stream parsing: `type,key,value` records with a `>>` sentinel
//!
//! One stream feeds all three tables at load time. Records are rejected
//! individually; the load as a whole fails only when no usable morse
//! entries came out of it.

use crate::codes::CodeTable;
use crate::hal::Diagnostics;
use crate::params::ParameterTable;
use crate::shortcodes::ShortcodeTable;

/// Record separator in the definition stream
pub const RECORD_DELIMITER: &str = ">>";

const MORSE_TAG: &str = "mcode";
const SHORT_TAG: &str = "scode";
const PARAM_TAG: &str = "pcode";

/// One parsed definition record, borrowing from the input stream
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Record<'a> {
    Morse { key: u32, value: char },
    Short { key: [u8; 2], phrase: &'a str },
    Param { name: &'a str, value: u32 },
}

/// Why a record was rejected
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Fewer than three comma-separated fields
    MissingField,
    /// Type field is not a recognized tag
    UnknownKind,
    /// Key field could not be parsed for its kind
    BadKey,
    /// Value field is empty or unparsable
    BadValue,
}

#[cfg(feature = "std")]
impl core::fmt::Display for RecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordError::MissingField => write!(f, "missing field"),
            RecordError::UnknownKind => write!(f, "unknown record type"),
            RecordError::BadKey => write!(f, "unparsable key"),
            RecordError::BadValue => write!(f, "unparsable value"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RecordError {}

/// Parse one record: comma-separated `type, key, value`
pub fn parse_record(raw: &str) -> Result<Record<'_>, RecordError> {
    let mut fields = raw.splitn(3, ',');
    let kind = fields.next().ok_or(RecordError::MissingField)?.trim();
    let key = fields.next().ok_or(RecordError::MissingField)?.trim();
    let value = fields.next().ok_or(RecordError::MissingField)?.trim();

    match kind {
        MORSE_TAG => {
            let key = parse_morse_key(key)?;
            let value = value.chars().next().ok_or(RecordError::BadValue)?;
            Ok(Record::Morse { key, value })
        }
        SHORT_TAG => {
            // short-code keys carry a ':' prefix, e.g. ":ih"
            let key = key.strip_prefix(':').ok_or(RecordError::BadKey)?;
            let kb = key.as_bytes();
            if kb.len() < 2 || !kb.is_ascii() {
                return Err(RecordError::BadKey);
            }
            Ok(Record::Short {
                key: [kb[0], kb[1]],
                phrase: value,
            })
        }
        PARAM_TAG => {
            let name = key.strip_prefix(':').ok_or(RecordError::BadKey)?;
            let value: u32 = value.parse().map_err(|_| RecordError::BadValue)?;
            Ok(Record::Param { name, value })
        }
        _ => Err(RecordError::UnknownKind),
    }
}

/// Morse keys are digit strings of 1 and 2, most significant first
fn parse_morse_key(key: &str) -> Result<u32, RecordError> {
    if key.is_empty() || key.len() > 9 {
        return Err(RecordError::BadKey);
    }
    let mut acc: u32 = 0;
    for b in key.bytes() {
        let digit = match b {
            b'1' => 1,
            b'2' => 2,
            _ => return Err(RecordError::BadKey),
        };
        acc = acc * 10 + digit;
    }
    Ok(acc)
}

/// Per-kind outcome counts for one load pass
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct LoadReport {
    pub morse: usize,
    pub short: usize,
    pub params: usize,
    pub rejected: usize,
    pub truncated: usize,
}

/// Wholesale load failure
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Not a single valid morse entry came out of the stream; the engine
    /// would decode nothing
    NoMorseEntries,
    /// The code table was already loaded and frozen
    AlreadyLoaded,
}

#[cfg(feature = "std")]
impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::NoMorseEntries => write!(f, "no valid morse entries in stream"),
            LoadError::AlreadyLoaded => write!(f, "definitions were already loaded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LoadError {}

/// Feed a whole definition stream into the three tables, then freeze the
/// code table. Rejected records are reported to `diag` and counted; only
/// an unusable morse table aborts the load.
pub fn load_definitions<const MC: usize, const SC: usize>(
    input: &str,
    codes: &mut CodeTable<MC>,
    shortcodes: &mut ShortcodeTable<SC>,
    params: &mut ParameterTable,
    diag: &mut impl Diagnostics,
) -> Result<LoadReport, LoadError> {
    if codes.is_frozen() {
        return Err(LoadError::AlreadyLoaded);
    }

    let mut report = LoadReport::default();
    for raw in input.split(RECORD_DELIMITER) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match parse_record(raw) {
            Ok(Record::Morse { key, value }) => match codes.load(key, value) {
                Ok(()) => report.morse += 1,
                Err(_) => {
                    diag.capacity_exceeded("code table");
                    report.rejected += 1;
                }
            },
            Ok(Record::Short { key, phrase }) => match shortcodes.load(key, phrase) {
                Ok(loaded) => {
                    report.short += 1;
                    if loaded.truncated {
                        diag.truncated("short-code phrase");
                        report.truncated += 1;
                    }
                }
                Err(_) => {
                    diag.capacity_exceeded("short-code table");
                    report.rejected += 1;
                }
            },
            Ok(Record::Param { name, value }) => match params.load(name, value) {
                Ok(()) => report.params += 1,
                Err(err) => {
                    diag.param_rejected(&err);
                    report.rejected += 1;
                }
            },
            Err(err) => {
                diag.record_rejected(&err);
                report.rejected += 1;
            }
        }
    }

    if report.morse == 0 {
        return Err(LoadError::NoMorseEntries);
    }
    // single freeze right after a successful load
    codes.freeze().map_err(|_| LoadError::AlreadyLoaded)?;
    Ok(report)
}
