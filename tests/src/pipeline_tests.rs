//! Full-pipeline tests: pulses in, displayed text and speech out

use crate::script::*;
use talk_core::{Command, KeyEvent, SwitchId};
use talk_core::hal::Duration;

#[test]
fn spelled_word_is_displayed_and_spoken() {
    let (mut engine, mut sinks) = engine_with_factory();

    key_word(&mut engine, &mut sinks, "HELLO");

    assert_eq!(engine.text(), "HELLO ");
    assert_eq!(sinks.chars.as_slice(), &['H', 'E', 'L', 'L', 'O']);
    assert_eq!(sinks.spoken[0].as_str(), "HELLO");
    assert_eq!(engine.history().get(0), Some("HELLO"));
}

#[test]
fn multi_word_message_accumulates_in_history() {
    let (mut engine, mut sinks) = engine_with_factory();

    key_word(&mut engine, &mut sinks, "SEE");
    key_word(&mut engine, &mut sinks, "YOU");

    assert_eq!(engine.text(), "SEE YOU ");
    assert_eq!(engine.history().get(0), Some("SEE"));
    assert_eq!(engine.history().get(1), Some("YOU"));
}

#[test]
fn shortcode_expands_and_is_spoken_as_phrase() {
    let (mut engine, mut sinks) = engine_with_factory();

    // ":TY" expands to the factory courtesy phrase
    key_word(&mut engine, &mut sinks, ":TY");

    assert_eq!(engine.text(), "Thank you ");
    assert_eq!(sinks.spoken[0].as_str(), "Thank you");
    assert_eq!(engine.history().get(0), Some("Thank you"));
}

#[test]
fn shortcode_lookup_is_case_insensitive_end_to_end() {
    let (mut engine, mut sinks) = engine_with_factory();

    // patterns only produce upper case; prove the table level anyway
    key_word(&mut engine, &mut sinks, ":ih");
    assert_eq!(engine.text(), "I am hungry ");
}

#[test]
fn unknown_shortcode_stays_literal_and_is_reported() {
    let (mut engine, mut sinks) = engine_with_factory();

    key_word(&mut engine, &mut sinks, ":ZQ");

    assert_eq!(engine.text(), ":ZQ ");
    assert_eq!(sinks.shortcode_misses[0].as_str(), "ZQ");
}

#[test]
fn send_message_speaks_the_assembled_text_and_clears() {
    let (mut engine, mut sinks) = engine_with_factory();

    key_word(&mut engine, &mut sinks, "I");
    key_word(&mut engine, &mut sinks, "SEE");
    engine
        .handle_command(Command::SendMessage, &mut sinks)
        .unwrap();

    assert_eq!(sinks.spoken.last().unwrap().as_str(), "I SEE");
    assert_eq!(engine.text(), "");
    assert!(engine.history().is_empty());
}

#[test]
fn long_message_sends_whole_and_clears_history() {
    let (mut engine, mut sinks) = engine_with_factory();

    // eleven expanded phrases join to well past 256 bytes
    for _ in 0..11 {
        key_word(&mut engine, &mut sinks, ":IB");
    }
    engine
        .handle_command(Command::SendMessage, &mut sinks)
        .unwrap();

    let sent = sinks.spoken.last().unwrap();
    assert_eq!(sent.len(), 11 * 23 + 10);
    assert!(sent.starts_with("I need a bathroom break I need a bathroom break"));
    assert!(engine.history().is_empty());
    assert_eq!(engine.text(), "");

    // the engine is ready for the next message
    key_word(&mut engine, &mut sinks, ":TY");
    engine
        .handle_command(Command::SendMessage, &mut sinks)
        .unwrap();
    assert_eq!(sinks.spoken.last().unwrap().as_str(), "Thank you");
}

#[test]
fn send_flushes_the_word_in_progress() {
    let (mut engine, mut sinks) = engine_with_factory();

    key_word(&mut engine, &mut sinks, "ON");
    key_char(&mut engine, &mut sinks, 'M');
    key_char(&mut engine, &mut sinks, 'E');
    engine
        .handle_command(Command::SendMessage, &mut sinks)
        .unwrap();

    assert_eq!(sinks.spoken.last().unwrap().as_str(), "ON ME");
}

#[test]
fn unknown_pulse_sequence_degrades_to_a_miss() {
    let (mut engine, mut sinks) = engine_with_factory();

    // ......: six dots is no character in the factory table
    for _ in 0..6 {
        engine.handle_event(press_for('.'), &mut sinks);
    }
    engine.handle_event(char_gap(), &mut sinks);

    assert_eq!(sinks.code_misses.as_slice(), &[111111]);
    assert_eq!(engine.text(), "");

    // the pipeline keeps decoding afterwards
    key_char(&mut engine, &mut sinks, 'E');
    assert_eq!(engine.text(), "E");
}

#[test]
fn backspace_corrects_mid_character_and_mid_word() {
    let (mut engine, mut sinks) = engine_with_factory();

    key_char(&mut engine, &mut sinks, 'H');

    // one stray dash, removed before it resolves
    engine.handle_event(press_for('-'), &mut sinks);
    engine
        .handle_command(Command::Backspace, &mut sinks)
        .unwrap();
    engine.handle_event(char_gap(), &mut sinks);
    assert_eq!(engine.text(), "H");

    // now erase the committed character
    engine
        .handle_command(Command::Backspace, &mut sinks)
        .unwrap();
    assert_eq!(engine.text(), "");
}

#[test]
fn word_boundary_command_matches_the_timed_gap() {
    let (mut engine, mut sinks) = engine_with_factory();

    key_char(&mut engine, &mut sinks, 'O');
    key_char(&mut engine, &mut sinks, 'K');
    engine
        .handle_command(Command::WordBoundary, &mut sinks)
        .unwrap();

    assert_eq!(engine.text(), "OK ");
    assert_eq!(engine.history().get(0), Some("OK"));
}

#[test]
fn intra_gap_does_not_resolve_anything() {
    let (mut engine, mut sinks) = engine_with_factory();

    engine.handle_event(press_for('.'), &mut sinks);
    engine.handle_event(
        KeyEvent::Gap {
            elapsed: Duration::from_millis(300),
        },
        &mut sinks,
    );
    assert!(sinks.chars.is_empty());

    // the pending pulses survive the short gap
    engine.handle_event(press_for('.'), &mut sinks);
    engine.handle_event(char_gap(), &mut sinks);
    assert_eq!(sinks.chars.as_slice(), &['I']);
}

#[test]
fn two_switch_mode_decodes_by_switch_identity() {
    let mut config = talk_core::default_config();
    config.switch_mode = talk_core::SwitchMode::TwoSwitch;
    let mut engine = talk_core::Engine::new(config);
    let mut sinks = talk_core::hal::mock::RecordingSinks::new();
    engine
        .load_definitions(pulsetalk_firmware::FACTORY_DEFINITIONS, &mut sinks)
        .unwrap();

    // N is dash dot; both presses deliberately "wrong" length
    engine.handle_event(
        KeyEvent::Press {
            switch: SwitchId::Secondary,
            held: Duration::from_millis(100),
        },
        &mut sinks,
    );
    engine.handle_event(
        KeyEvent::Press {
            switch: SwitchId::Primary,
            held: Duration::from_millis(900),
        },
        &mut sinks,
    );
    engine.handle_event(char_gap(), &mut sinks);

    assert_eq!(sinks.chars.as_slice(), &['N']);
}
