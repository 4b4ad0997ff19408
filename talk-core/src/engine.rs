//! The decode-and-assembly engine
//!
//! One engine instance owns every table and buffer for its whole
//! lifetime and is driven from a single task: pulse events and gap
//! classifications come in, decoded characters, committed words and
//! spoken messages go out through the collaborator traits. No operation
//! here is fatal; with an empty code table every lookup degrades to a
//! miss and the engine keeps running.

use core::fmt::Write;

use heapless::String;

use crate::codes::CodeTable;
use crate::hal::{Collaborators, Duration};
use crate::message::MessageHistory;
use crate::params::{BlobReport, ParamError, ParamId, ParameterTable};
use crate::pulses::PulseSequence;
use crate::records::{self, LoadError, LoadReport};
use crate::shortcodes::ShortcodeTable;
use crate::types::{
    EngineConfig, GapKind, Pulse, StoreError, SwitchId, SwitchMode, MAX_MORSE_CODES, MAX_PULSES,
    MAX_SHORT_CODES, MAX_SHORT_TEXT, MAX_WORDS, MESSAGE_TEXT, WORD_TEXT,
};
use crate::word::{WordBuffer, COMPACT_MIN_OFFSET};

/// Capacity for an assembled outgoing message: a full history of
/// maximum-length entries, space-joined, must always fit, or a long
/// message could never be sent and never cleared
pub const ASSEMBLED_TEXT: usize = MAX_WORDS * (MESSAGE_TEXT + 1);

/// Input events, produced by the switch layer
#[derive(Copy, Clone, Debug)]
pub enum KeyEvent {
    /// A completed switch press
    Press { switch: SwitchId, held: Duration },
    /// Idle time since the last edge; only ever resolves boundaries,
    /// never discards input
    Gap { elapsed: Duration },
}

/// User commands, mapped 1:1 from the input layer
#[derive(Copy, Clone, Debug)]
pub enum Command {
    /// Remove the last pulse, or the last character when no pulses are
    /// pending
    Backspace,
    /// Force a word boundary
    WordBoundary,
    /// Validated timing-parameter edit
    SetParameter { id: ParamId, value: u32 },
    /// Revert the most recent accepted parameter edit
    UndoParameter,
    /// Discard all user overrides
    ResetParameters,
    /// Emit the current parameter values as status lines
    ListParameters,
    /// Flush the word in progress, speak the assembled message, start a
    /// new one
    SendMessage,
}

/// Engine-level error, surfaced to the bootstrap or command caller
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    Store(StoreError),
    Param(ParamError),
    Load(LoadError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Store(err)
    }
}

impl From<ParamError> for EngineError {
    fn from(err: ParamError) -> Self {
        EngineError::Param(err)
    }
}

impl From<LoadError> for EngineError {
    fn from(err: LoadError) -> Self {
        EngineError::Load(err)
    }
}

#[cfg(feature = "std")]
impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::Store(e) => write!(f, "{e}"),
            EngineError::Param(e) => write!(f, "{e}"),
            EngineError::Load(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// The stateful accumulation pipeline
pub struct Engine {
    config: EngineConfig,
    codes: CodeTable<MAX_MORSE_CODES>,
    shortcodes: ShortcodeTable<MAX_SHORT_CODES>,
    params: ParameterTable,
    pulses: PulseSequence<MAX_PULSES>,
    word: WordBuffer<WORD_TEXT>,
    history: MessageHistory<MAX_WORDS>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            codes: CodeTable::new(),
            shortcodes: ShortcodeTable::new(),
            params: ParameterTable::new(),
            pulses: PulseSequence::new(),
            word: WordBuffer::new(),
            history: MessageHistory::new(),
        }
    }

    /// Load the definition stream into the tables and freeze the code
    /// table. On failure the bootstrap may retry with factory defaults.
    pub fn load_definitions(
        &mut self,
        input: &str,
        sinks: &mut impl Collaborators,
    ) -> Result<LoadReport, LoadError> {
        records::load_definitions(
            input,
            &mut self.codes,
            &mut self.shortcodes,
            &mut self.params,
            sinks,
        )
    }

    /// Apply the persisted user-parameter blob on top of factory values
    pub fn apply_user_blob(&mut self, blob: &str) -> BlobReport {
        self.params.apply_user_blob(blob)
    }

    /// Serialize the current parameter values for persistence
    pub fn write_user_blob<const M: usize>(
        &self,
        out: &mut String<M>,
    ) -> Result<(), StoreError> {
        self.params.write_user_blob(out)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn params(&self) -> &ParameterTable {
        &self.params
    }

    /// Current visible text (read-only snapshot for collaborators)
    pub fn text(&self) -> &str {
        self.word.as_str()
    }

    pub fn history(&self) -> &MessageHistory<MAX_WORDS> {
        &self.history
    }

    /// Map a completed press to a pulse symbol
    pub fn classify_press(&self, switch: SwitchId, held: Duration) -> Pulse {
        match self.config.switch_mode {
            SwitchMode::TwoSwitch => match switch {
                SwitchId::Primary => Pulse::Dot,
                SwitchId::Secondary => Pulse::Dash,
            },
            SwitchMode::OneSwitch => {
                let long_press = self.params.get(ParamId::LongPress) as u64;
                if held.as_millis() >= long_press {
                    Pulse::Dash
                } else {
                    Pulse::Dot
                }
            }
        }
    }

    /// Classify an idle time against the gap parameters
    pub fn classify_gap(&self, elapsed: Duration) -> GapKind {
        let ms = elapsed.as_millis();
        if ms >= self.params.get(ParamId::WordGap) as u64 {
            GapKind::Word
        } else if ms >= self.params.get(ParamId::CharGap) as u64 {
            GapKind::Character
        } else {
            GapKind::Intra
        }
    }

    /// Feed one input event through the pipeline.
    ///
    /// Gap events are idempotent: once a boundary has resolved, repeats
    /// of the same classification find nothing left to do, so the event
    /// source may report idle time on every scan.
    pub fn handle_event(&mut self, event: KeyEvent, sinks: &mut impl Collaborators) {
        match event {
            KeyEvent::Press { switch, held } => {
                let pulse = self.classify_press(switch, held);
                if self.pulses.push(pulse).is_err() {
                    sinks.capacity_exceeded("pulse sequence");
                }
            }
            KeyEvent::Gap { elapsed } => match self.classify_gap(elapsed) {
                GapKind::Intra => {}
                GapKind::Character => self.resolve_character(sinks),
                GapKind::Word => self.resolve_word(sinks),
            },
        }
    }

    /// Inter-character boundary: turn the pulse sequence into a character
    fn resolve_character(&mut self, sinks: &mut impl Collaborators) {
        if self.pulses.is_empty() {
            return;
        }
        let key = self.pulses.value();
        self.pulses.clear();

        match self.codes.lookup(key) {
            Some(c) => {
                match self.word.append(c) {
                    Ok(()) => {
                        sinks.char_decoded(c);
                        sinks.text_updated(self.word.as_str());
                    }
                    Err(_) => sinks.capacity_exceeded("word buffer"),
                }
                self.maybe_compact(sinks);
            }
            None => sinks.code_miss(key),
        }
    }

    /// Inter-word boundary: commit the token in progress
    fn resolve_word(&mut self, sinks: &mut impl Collaborators) {
        self.resolve_character(sinks);

        let token = self.word.current_token();
        if token.is_empty() {
            return;
        }

        if let Some(query) = token.strip_prefix(':') {
            let expansion = self.shortcodes.lookup(query).map(|phrase| {
                // phrases are bounded at MAX_SHORT_TEXT, this always fits
                let mut owned: String<MAX_SHORT_TEXT> = String::new();
                let _ = owned.push_str(phrase);
                owned
            });
            if let Some(phrase) = expansion {
                match self.word.replace_current_token(&phrase) {
                    Ok(()) => self.commit_word_text(&phrase, sinks),
                    Err(_) => sinks.capacity_exceeded("word buffer"),
                }
                sinks.text_updated(self.word.as_str());
                self.maybe_compact(sinks);
                return;
            }
            sinks.shortcode_miss(query);
        }

        // literal token: commit it as typed
        match self.word.commit_space() {
            Ok(()) => self.commit_word_text(&token, sinks),
            Err(_) => sinks.capacity_exceeded("word buffer"),
        }
        sinks.text_updated(self.word.as_str());
        self.maybe_compact(sinks);
    }

    fn commit_word_text(&mut self, text: &str, sinks: &mut impl Collaborators) {
        if self.history.push(text).is_err() {
            sinks.capacity_exceeded("message history");
        }
        sinks.speak(text);
    }

    fn maybe_compact(&mut self, sinks: &mut impl Collaborators) {
        if self.word.len() > self.config.compact_threshold
            && self.word.compact(COMPACT_MIN_OFFSET) > 0
        {
            sinks.text_updated(self.word.as_str());
        }
    }

    /// Execute one user command. Rejections are reported through the
    /// diagnostics collaborator and also returned for the caller.
    pub fn handle_command(
        &mut self,
        command: Command,
        sinks: &mut impl Collaborators,
    ) -> Result<(), EngineError> {
        match command {
            Command::Backspace => {
                if self.pulses.pop().is_none() {
                    self.word.backspace();
                }
                sinks.text_updated(self.word.as_str());
                Ok(())
            }
            Command::WordBoundary => {
                self.resolve_word(sinks);
                Ok(())
            }
            Command::SetParameter { id, value } => {
                match self.params.set(id, value) {
                    Ok(()) => {
                        self.status(sinks, id, value);
                        Ok(())
                    }
                    Err(err) => {
                        sinks.param_rejected(&err);
                        Err(err.into())
                    }
                }
            }
            Command::UndoParameter => match self.params.undo() {
                Ok((id, restored)) => {
                    self.status(sinks, id, restored);
                    Ok(())
                }
                Err(err) => {
                    sinks.param_rejected(&err);
                    Err(err.into())
                }
            },
            Command::ResetParameters => {
                self.params.reset_to_factory();
                sinks.status_line("parameters reset to factory");
                Ok(())
            }
            Command::ListParameters => {
                for (id, value) in self.params.iter() {
                    let mut line: String<64> = String::new();
                    let _ = write!(line, "{} = {} ms", id.name(), value);
                    sinks.status_line(&line);
                }
                Ok(())
            }
            Command::SendMessage => self.send_message(sinks),
        }
    }

    fn status(&self, sinks: &mut impl Collaborators, id: ParamId, value: u32) {
        let mut line: String<64> = String::new();
        let _ = write!(line, "{} = {} ms", id.name(), value);
        sinks.status_line(&line);
    }

    fn send_message(&mut self, sinks: &mut impl Collaborators) -> Result<(), EngineError> {
        // flush the partial word first
        self.resolve_word(sinks);
        if self.history.is_empty() {
            return Ok(());
        }

        let mut message: String<ASSEMBLED_TEXT> = String::new();
        match self.history.assemble(&mut message) {
            Ok(()) => {
                sinks.speak(&message);
                self.history.clear();
                self.word.clear();
                sinks.text_updated(self.word.as_str());
                Ok(())
            }
            Err(err) => {
                sinks.capacity_exceeded("assembled message");
                Err(err.into())
            }
        }
    }

    /// Abandon the in-progress pulse sequence (explicit cancellation)
    pub fn abandon_pulses(&mut self) {
        self.pulses.clear();
    }
}

/// Async engine pump: drains completed presses and watches idle time,
/// at a fixed scan interval. Mirrors the input-side evaluator task.
#[cfg(feature = "embassy-time")]
pub async fn pump_task(
    engine: &mut Engine,
    input: &crate::input::SwitchInput,
    sinks: &mut impl Collaborators,
    scan: Duration,
) -> ! {
    use embassy_time::{Instant, Timer};

    loop {
        let now = Instant::now().as_millis() as u32;
        if let Some((switch, held)) = input.take_press() {
            let held = Duration::from_millis(held as u64);
            engine.handle_event(KeyEvent::Press { switch, held }, sinks);
        } else if !input.any_pressed() {
            let elapsed = Duration::from_millis(input.idle_for(now) as u64);
            engine.handle_event(KeyEvent::Gap { elapsed }, sinks);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("engine text: {}", engine.text());

        Timer::after(scan).await;
    }
}
