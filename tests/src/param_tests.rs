//! Parameter-edit behavior as seen through the engine command surface

use crate::script::engine_with_factory;
use heapless::String;
use rstest::rstest;
use talk_core::{Command, EngineError, ParamError, ParamId};

#[rstest]
#[case(ParamId::DotUnit, 220)]
#[case(ParamId::IntraGap, 210)]
#[case(ParamId::CharGap, 1100)]
#[case(ParamId::WordGap, 2200)]
#[case(ParamId::LongPress, 550)]
fn edits_within_the_change_rate_are_accepted(#[case] id: ParamId, #[case] value: u32) {
    let (mut engine, mut sinks) = engine_with_factory();
    engine
        .handle_command(Command::SetParameter { id, value }, &mut sinks)
        .unwrap();
    assert_eq!(engine.params().get(id), value);
    // an accepted edit echoes a status line
    assert!(!sinks.status.is_empty());
}

#[rstest]
#[case(ParamId::DotUnit, 10)]
#[case(ParamId::DotUnit, 5000)]
#[case(ParamId::DashMultiplier, 1)]
#[case(ParamId::WordGap, 100)]
fn edits_outside_the_hard_limits_are_rejected(#[case] id: ParamId, #[case] value: u32) {
    let (mut engine, mut sinks) = engine_with_factory();
    let before = engine.params().get(id);

    let err = engine
        .handle_command(Command::SetParameter { id, value }, &mut sinks)
        .unwrap_err();

    assert!(matches!(err, EngineError::Param(ParamError::OutOfRange { .. })));
    assert_eq!(engine.params().get(id), before);
    assert_eq!(sinks.param_rejections, 1);
}

#[rstest]
#[case(ParamId::DotUnit, 260)]
#[case(ParamId::CharGap, 1500)]
#[case(ParamId::LongPress, 700)]
fn edits_over_the_change_rate_are_rejected(#[case] id: ParamId, #[case] value: u32) {
    let (mut engine, mut sinks) = engine_with_factory();
    let before = engine.params().get(id);

    let err = engine
        .handle_command(Command::SetParameter { id, value }, &mut sinks)
        .unwrap_err();

    assert!(matches!(
        err,
        EngineError::Param(ParamError::ChangeTooLarge { .. })
    ));
    assert_eq!(engine.params().get(id), before);
}

#[test]
fn undo_reverts_only_the_most_recent_edit() {
    let (mut engine, mut sinks) = engine_with_factory();
    engine
        .handle_command(
            Command::SetParameter {
                id: ParamId::DotUnit,
                value: 210,
            },
            &mut sinks,
        )
        .unwrap();
    engine
        .handle_command(
            Command::SetParameter {
                id: ParamId::WordGap,
                value: 2100,
            },
            &mut sinks,
        )
        .unwrap();

    engine
        .handle_command(Command::UndoParameter, &mut sinks)
        .unwrap();
    assert_eq!(engine.params().get(ParamId::WordGap), 2000);
    assert_eq!(engine.params().get(ParamId::DotUnit), 210);

    let err = engine
        .handle_command(Command::UndoParameter, &mut sinks)
        .unwrap_err();
    assert!(matches!(err, EngineError::Param(ParamError::NothingToUndo)));
}

#[test]
fn reset_restores_the_loaded_values() {
    let (mut engine, mut sinks) = engine_with_factory();
    engine
        .handle_command(
            Command::SetParameter {
                id: ParamId::DotUnit,
                value: 210,
            },
            &mut sinks,
        )
        .unwrap();

    engine
        .handle_command(Command::ResetParameters, &mut sinks)
        .unwrap();
    assert_eq!(engine.params().get(ParamId::DotUnit), 200);
}

#[test]
fn list_emits_one_status_line_per_parameter() {
    let (mut engine, mut sinks) = engine_with_factory();
    let before = sinks.status.len();
    engine
        .handle_command(Command::ListParameters, &mut sinks)
        .unwrap();
    assert_eq!(sinks.status.len() - before, 6);
    assert!(sinks.status.iter().any(|l| l.as_str() == "du = 200 ms"));
}

#[test]
fn user_blob_round_trips_through_the_engine() {
    let (mut engine, mut sinks) = engine_with_factory();
    engine
        .handle_command(
            Command::SetParameter {
                id: ParamId::DotUnit,
                value: 220,
            },
            &mut sinks,
        )
        .unwrap();

    let mut blob: String<128> = String::new();
    engine.write_user_blob(&mut blob).unwrap();

    let (mut restored, _sinks) = engine_with_factory();
    let report = restored.apply_user_blob(&blob);
    assert_eq!(report.rejected, 0);
    assert_eq!(restored.params().get(ParamId::DotUnit), 220);
}

#[test]
fn blob_lines_are_validated_against_hard_limits_only() {
    // 400 is double the factory dot unit, far past the 10% edit rate,
    // but a persisted override only has to sit inside the hard limits
    let (mut engine, _sinks) = engine_with_factory();
    let report = engine.apply_user_blob("du=400\nwg=999999\n");
    assert_eq!(report.applied, 1);
    assert_eq!(report.rejected, 1);
    assert_eq!(engine.params().get(ParamId::DotUnit), 400);
    assert_eq!(engine.params().get(ParamId::WordGap), 2000);
}

#[test]
fn slower_dot_unit_changes_one_switch_classification() {
    use talk_core::{Pulse, SwitchId};
    use talk_core::hal::Duration;

    let (mut engine, mut sinks) = engine_with_factory();
    // 550 ms press: dash at the factory long-press threshold of 500
    assert_eq!(
        engine.classify_press(SwitchId::Primary, Duration::from_millis(550)),
        Pulse::Dash
    );

    engine
        .handle_command(
            Command::SetParameter {
                id: ParamId::LongPress,
                value: 550,
            },
            &mut sinks,
        )
        .unwrap();
    assert_eq!(
        engine.classify_press(SwitchId::Primary, Duration::from_millis(540)),
        Pulse::Dot
    );
}
