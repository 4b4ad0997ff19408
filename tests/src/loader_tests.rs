//! Definition-stream loading through the engine, including degraded loads

use crate::script::{char_gap, key_char, press_for};
use talk_core::hal::mock::RecordingSinks;
use talk_core::{default_config, Engine, LoadError, ParamId};

#[test]
fn factory_stream_fills_all_three_tables() {
    let mut engine = Engine::new(default_config());
    let mut sinks = RecordingSinks::new();

    let report = engine
        .load_definitions(pulsetalk_firmware::FACTORY_DEFINITIONS, &mut sinks)
        .unwrap();

    assert_eq!(report.morse, 37);
    assert_eq!(report.short, 5);
    assert_eq!(report.params, 6);
    assert_eq!(report.rejected, 0);
    assert_eq!(report.truncated, 0);
}

#[test]
fn second_load_is_refused() {
    let mut engine = Engine::new(default_config());
    let mut sinks = RecordingSinks::new();
    engine
        .load_definitions(pulsetalk_firmware::FACTORY_DEFINITIONS, &mut sinks)
        .unwrap();

    let err = engine
        .load_definitions("mcode,1,E", &mut sinks)
        .unwrap_err();
    assert_eq!(err, LoadError::AlreadyLoaded);
}

#[test]
fn bad_records_are_skipped_and_the_rest_decode() {
    let mut engine = Engine::new(default_config());
    let mut sinks = RecordingSinks::new();

    let stream = "mcode,11,I>>mcode,99,Q>>garbage>>pcode,:du,7>>scode,:x,too short key? no: x is one byte>>mcode,2,T";
    let report = engine.load_definitions(stream, &mut sinks).unwrap();

    assert_eq!(report.morse, 2);
    assert_eq!(report.rejected, 4);
    assert!(sinks.record_rejections >= 3);
    assert_eq!(sinks.param_rejections, 1);

    // the surviving entries drive the pipeline as usual
    key_char(&mut engine, &mut sinks, 'I');
    assert_eq!(engine.text(), "I");
}

#[test]
fn stream_without_morse_entries_aborts_the_load() {
    let mut engine = Engine::new(default_config());
    let mut sinks = RecordingSinks::new();

    let err = engine
        .load_definitions("scode,:ih,I am hungry>>pcode,:du,200", &mut sinks)
        .unwrap_err();
    assert_eq!(err, LoadError::NoMorseEntries);

    // the bootstrap retries with the factory stream on the same engine
    engine
        .load_definitions(pulsetalk_firmware::FACTORY_DEFINITIONS, &mut sinks)
        .unwrap();
    key_char(&mut engine, &mut sinks, 'E');
    assert_eq!(engine.text(), "E");
}

#[test]
fn overlong_phrases_load_truncated() {
    let mut engine = Engine::new(default_config());
    let mut sinks = RecordingSinks::new();

    let mut stream = std::string::String::from("mcode,1,E>>scode,:lp,");
    for _ in 0..120 {
        stream.push('x');
    }
    let report = engine.load_definitions(&stream, &mut sinks).unwrap();

    assert_eq!(report.short, 1);
    assert_eq!(report.truncated, 1);
    assert_eq!(sinks.truncations, 1);
}

#[test]
fn stream_parameters_replace_the_built_in_factory_values() {
    let mut engine = Engine::new(default_config());
    let mut sinks = RecordingSinks::new();

    engine
        .load_definitions("mcode,1,E>>pcode,:wg,3000", &mut sinks)
        .unwrap();
    assert_eq!(engine.params().get(ParamId::WordGap), 3000);

    // loaded values are the reset baseline, not the built-in ones
    engine.apply_user_blob("wg=4000\n");
    assert_eq!(engine.params().get(ParamId::WordGap), 4000);
    engine
        .handle_command(talk_core::Command::ResetParameters, &mut sinks)
        .unwrap();
    assert_eq!(engine.params().get(ParamId::WordGap), 3000);
}

#[test]
fn decoding_before_any_load_reports_misses_only() {
    let mut engine = Engine::new(default_config());
    let mut sinks = RecordingSinks::new();

    engine.handle_event(press_for('.'), &mut sinks);
    engine.handle_event(char_gap(), &mut sinks);

    assert_eq!(engine.text(), "");
    assert_eq!(sinks.code_misses.as_slice(), &[1]);
}
