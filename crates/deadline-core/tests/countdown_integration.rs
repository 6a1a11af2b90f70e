//! Integration tests: configuration through evaluation to rendered label.

use deadline_core::{
    evaluate, render, Bucket, Config, DateSpec, DateZone, DisplayState, FeelingTier,
    LabelTemplates, Snapshot,
};

const BEGIN: i64 = 1_653_609_600; // 2022-05-27T00:00:00Z
const END: i64 = 1_654_473_600; // 2022-06-06T00:00:00Z

fn reference_config() -> Config {
    Config {
        begin: Some(DateSpec::Utc([2022, 5, 27, 0, 0])),
        end: Some(DateSpec::Utc([2022, 6, 6, 0, 0])),
        ..Config::default()
    }
}

#[test]
fn test_reference_window_half_way() {
    let cfg = reference_config();
    let window = cfg.evaluable_window();
    assert!(window.is_some());

    let state = evaluate(window, BEGIN + 432_000);
    let DisplayState::InProgress { days_left, percent_complete, bucket, .. } = state else {
        panic!("expected in progress, got {state:?}");
    };
    assert_eq!(days_left, 5);
    assert_eq!(percent_complete.value, 50.0);
    assert_eq!(bucket, Bucket::Days);

    let rendered = render(&state, &cfg.labels);
    assert_eq!(rendered.text, "5d 0h (50%)");
    assert_eq!(rendered.icon, FeelingTier::Smile.icon_name());
}

#[test]
fn test_countdown_walks_through_every_state() {
    let snap = Snapshot::from(&reference_config());

    let labels: Vec<String> = [
        BEGIN - 1,
        BEGIN,
        END - 86_400,
        END - 86_399,
        END - 3_600,
        END - 3_599,
        END - 1,
        END,
        END + 1,
    ]
    .into_iter()
    .map(|now| snap.frame(now).rendered.text)
    .collect();

    assert_eq!(
        labels,
        vec![
            "CHILLOUT",
            "10d 0h (0%)",
            "1d 0h (90%)",
            "23h 59m (90%)",
            "1h 0m (99.58%)",
            "59m 59s (99.58%)",
            "0m 1s (100.00%)",
            "0m 0s (100.00%)",
            "DEADLINE!",
        ]
    );
}

#[test]
fn test_feeling_follows_progress() {
    let snap = Snapshot::from(&reference_config());
    let tier_at = |fraction: f64| {
        let now = BEGIN + ((END - BEGIN) as f64 * fraction) as i64;
        snap.frame(now).rendered.tier
    };
    assert_eq!(snap.frame(BEGIN - 10).rendered.tier, FeelingTier::Angel);
    assert_eq!(tier_at(0.10), FeelingTier::Cool);
    assert_eq!(tier_at(0.40), FeelingTier::Smile);
    assert_eq!(tier_at(0.70), FeelingTier::Plain);
    assert_eq!(tier_at(0.92), FeelingTier::Worried);
    assert_eq!(tier_at(0.97), FeelingTier::Surprise);
    assert_eq!(snap.frame(END + 10).rendered.tier, FeelingTier::Sick);
}

#[test]
fn test_invalid_configuration_is_unconfigured() {
    let missing = Config::default();
    let reversed = Config {
        begin: Some(DateSpec::Text("2022-06-06".into())),
        end: Some(DateSpec::Text("2022-05-27".into())),
        date_zone: DateZone::Utc,
        ..Config::default()
    };
    let garbage = Config {
        begin: Some(DateSpec::Text("not a date".into())),
        end: Some(DateSpec::Text("2022-05-27".into())),
        ..Config::default()
    };

    for cfg in [missing, reversed, garbage] {
        let snap = Snapshot::from(&cfg);
        let frame = snap.frame(BEGIN);
        assert_eq!(frame.state, DisplayState::Unconfigured);
        assert_eq!(frame.rendered.text, "Invalid dates");
        assert_eq!(frame.rendered.tier, FeelingTier::Sick);
    }
}

#[test]
fn test_custom_labels() {
    let mut cfg = reference_config();
    cfg.labels = LabelTemplates {
        days: "{2}% done, {0} days left".into(),
        ..LabelTemplates::default()
    };
    let snap = Snapshot::from(&cfg);
    assert_eq!(snap.frame(BEGIN).rendered.text, "0% done, 10 days left");
}
