//! Scripted input helpers: spell text as timed press and gap events

use pulsetalk_firmware::FACTORY_DEFINITIONS;
use talk_core::hal::mock::RecordingSinks;
use talk_core::hal::Duration;
use talk_core::{default_config, Engine, KeyEvent, SwitchId};

/// An engine loaded with the firmware's factory definitions
pub fn engine_with_factory() -> (Engine, RecordingSinks) {
    let mut engine = Engine::new(default_config());
    let mut sinks = RecordingSinks::new();
    engine
        .load_definitions(FACTORY_DEFINITIONS, &mut sinks)
        .expect("factory definitions must load");
    (engine, sinks)
}

/// Morse pattern for the characters the factory table carries
pub fn pattern_for(c: char) -> &'static str {
    match c.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        ':' => "---...",
        _ => panic!("no pattern for {c:?}"),
    }
}

/// One-switch press lengths: below and above the 500 ms long-press
/// threshold
pub fn press_for(symbol: char) -> KeyEvent {
    let held = match symbol {
        '.' => Duration::from_millis(120),
        _ => Duration::from_millis(650),
    };
    KeyEvent::Press {
        switch: SwitchId::Primary,
        held,
    }
}

/// Idle long enough to end a character but not a word
pub fn char_gap() -> KeyEvent {
    KeyEvent::Gap {
        elapsed: Duration::from_millis(1200),
    }
}

/// Idle long enough to end a word
pub fn word_gap() -> KeyEvent {
    KeyEvent::Gap {
        elapsed: Duration::from_millis(2500),
    }
}

/// Key one character's pattern, then an inter-character gap
pub fn key_char(engine: &mut Engine, sinks: &mut RecordingSinks, c: char) {
    for symbol in pattern_for(c).chars() {
        engine.handle_event(press_for(symbol), sinks);
    }
    engine.handle_event(char_gap(), sinks);
}

/// Key a whole word and commit it with a word gap
pub fn key_word(engine: &mut Engine, sinks: &mut RecordingSinks, word: &str) {
    for c in word.chars() {
        key_char(engine, sinks, c);
    }
    engine.handle_event(word_gap(), sinks);
}
