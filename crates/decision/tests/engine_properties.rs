use decision::{
    next_state, studying_ratio, DecisionConfig, DecisionEngine, ManualClock, StudyState,
};
use detection::{Category, DetectionResult};
use proptest::prelude::*;
use std::time::Duration;

fn engine_with(config: DecisionConfig) -> (DecisionEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let engine = DecisionEngine::with_clock(config, clock.clone()).unwrap();
    (engine, clock)
}

fn any_state() -> impl Strategy<Value = StudyState> {
    prop_oneof![
        Just(StudyState::Studying),
        Just(StudyState::Distracted),
        Just(StudyState::AlertActive),
    ]
}

proptest! {
    #[test]
    fn ema_follows_recurrence(
        alpha in 0.001f64..=1.0,
        studying in 0.0f64..=1.0,
        not_studying in 0.0f64..=1.0,
    ) {
        let (mut engine, _) = engine_with(DecisionConfig { ema_alpha: alpha, ..Default::default() });
        let result = DetectionResult::from_category_scores(studying, not_studying, 0.0);
        let ratio = studying_ratio(&result);
        let old = engine.ema();
        engine.update(result);
        prop_assert!((engine.ema() - (alpha * ratio + (1.0 - alpha) * old)).abs() < 1e-9);
    }

    #[test]
    fn ratio_stays_in_unit_interval(
        studying in 0.0f64..=1.0,
        not_studying in 0.0f64..=1.0,
        absent in 0.0f64..=1.0,
    ) {
        let ratio = studying_ratio(&DetectionResult::from_category_scores(studying, not_studying, absent));
        prop_assert!((0.0..=1.0).contains(&ratio));
    }

    #[test]
    fn malformed_scores_never_poison_the_ema(
        studying in any::<f64>(),
        not_studying in any::<f64>(),
        alpha in 0.001f64..=1.0,
    ) {
        let result = DetectionResult::from_category_scores(studying, not_studying, 0.0);
        let ratio = studying_ratio(&result);
        prop_assert!((0.0..=1.0).contains(&ratio));

        let (mut engine, _) = engine_with(DecisionConfig { ema_alpha: alpha, ..Default::default() });
        engine.update(result);
        prop_assert!(engine.ema().is_finite());
        prop_assert!(engine.ema() >= 0.0 && engine.ema() <= 1.0 + 1e-12);
    }

    #[test]
    fn absent_always_zero(absent in 0.01f64..=1.0) {
        let result = DetectionResult::from_category_scores(absent * 0.5, absent * 0.25, absent);
        prop_assert_eq!(result.status, Category::Absent);
        prop_assert_eq!(studying_ratio(&result), 0.0);
    }

    #[test]
    fn reset_restores_baseline(
        ratios in proptest::collection::vec(0.0f64..=1.0, 1..20),
        step_secs in 0.0f64..10.0,
    ) {
        let (mut engine, clock) = engine_with(DecisionConfig { ema_alpha: 0.7, ..Default::default() });
        for r in ratios {
            clock.advance_secs(step_secs);
            engine.update(DetectionResult::from_category_scores(r, 1.0 - r, 0.0));
        }
        engine.reset();
        prop_assert_eq!(engine.state(), StudyState::Studying);
        prop_assert_eq!(engine.ema(), 1.0);
        prop_assert!(engine.last_result().is_none());
    }

    #[test]
    fn alert_exit_ignores_elapsed_time(elapsed_secs in 0.0f64..1000.0) {
        let config = DecisionConfig::default();
        let next = next_state(StudyState::AlertActive, true, Duration::from_secs_f64(elapsed_secs), &config);
        prop_assert_eq!(next, StudyState::Studying);
    }

    #[test]
    fn no_time_no_transition_loops(
        state in any_state(),
        is_studying in any::<bool>(),
    ) {
        // With zero elapsed time, a second step from the result of the first
        // is always a no-op.
        let config = DecisionConfig { recovery_time: 1.0, distraction_timeout: 1.0, ..Default::default() };
        let once = next_state(state, is_studying, Duration::ZERO, &config);
        let twice = next_state(once, is_studying, Duration::ZERO, &config);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn repeated_identical_updates_settle(
        studying in 0.0f64..=1.0,
        not_studying in 0.0f64..=1.0,
        repeats in 2usize..30,
    ) {
        let (mut engine, _) = engine_with(DecisionConfig { ema_alpha: 1.0, ..Default::default() });
        let result = DetectionResult::from_category_scores(studying, not_studying, 0.0);
        let first = engine.update(result.clone());
        for _ in 0..repeats {
            prop_assert_eq!(engine.update(result.clone()), first);
        }
    }
}

#[test]
fn nan_detection_does_not_stick() {
    let (mut engine, clock) = engine_with(DecisionConfig {
        ema_alpha: 1.0,
        ..Default::default()
    });
    engine.update(DetectionResult::from_category_scores(f64::NAN, 0.2, 0.0));
    assert_eq!(engine.ema(), 0.0);
    assert_eq!(engine.state(), StudyState::Distracted);

    for _ in 0..50 {
        clock.advance_secs(1.0);
        engine.update(DetectionResult::from_category_scores(0.95, 0.05, 0.0));
    }
    assert!((engine.ema() - 0.95).abs() < 1e-9);
    assert_eq!(engine.state(), StudyState::Studying);
}

#[test]
fn unrepresentable_timeout_fails_at_construction() {
    let config = DecisionConfig {
        ema_alpha: 1.0,
        distraction_timeout: 1e20,
        ..Default::default()
    };
    assert!(DecisionEngine::with_clock(config.clone(), ManualClock::new()).is_err());

    // The table itself saturates instead of panicking
    let next = next_state(StudyState::Distracted, false, Duration::from_secs(3600), &config);
    assert_eq!(next, StudyState::Distracted);
}

#[test]
fn single_low_frame_does_not_alert() {
    let (mut engine, _) = engine_with(DecisionConfig {
        ema_alpha: 0.3,
        ..Default::default()
    });
    engine.update(DetectionResult::from_category_scores(0.1, 0.9, 0.0));
    assert_ne!(engine.state(), StudyState::AlertActive);
}

#[test]
fn distraction_timeout_escalates_without_smoothing() {
    let (mut engine, clock) = engine_with(DecisionConfig {
        ema_alpha: 1.0,
        distraction_timeout: 5.0,
        ..Default::default()
    });
    let low = DetectionResult::from_category_scores(0.1, 0.9, 0.0);

    assert_eq!(engine.update(low.clone()), StudyState::Distracted);
    clock.advance(Duration::from_secs(5));
    assert_eq!(engine.update(low), StudyState::AlertActive);
}

#[test]
fn recovering_update_before_recovery_time_stays_distracted() {
    let (mut engine, clock) = engine_with(DecisionConfig {
        ema_alpha: 1.0,
        recovery_time: 5.0,
        ..Default::default()
    });
    engine.update(DetectionResult::from_category_scores(0.1, 0.9, 0.0));
    clock.advance_secs(4.99);
    assert_eq!(
        engine.update(DetectionResult::from_category_scores(0.9, 0.1, 0.0)),
        StudyState::Distracted
    );
}

#[test]
fn threshold_is_inclusive() {
    let (mut engine, _) = engine_with(DecisionConfig {
        ema_alpha: 1.0,
        studying_threshold: 0.5,
        ..Default::default()
    });
    assert_eq!(
        engine.update(DetectionResult::from_category_scores(0.4, 0.4, 0.0)),
        StudyState::Studying
    );
    assert_eq!(engine.ema(), 0.5);
}
