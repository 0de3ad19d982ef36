use proptest::prelude::*;
use rstest::rstest;
use servo_core::{StepSize, next_position};
use std::time::Duration;

// Walk from `from` to `to` the way the controller does, returning every
// emitted position.
fn walk(from: f64, to: f64, step: StepSize) -> Vec<f64> {
    let mut cur = Some(from);
    let mut out = Vec::new();
    while cur != Some(to) {
        let next = next_position(cur, to, step);
        out.push(next);
        cur = Some(next);
        assert!(out.len() < 100_000, "walk does not converge");
    }
    out
}

#[rstest]
#[case::default_full_sweep(5, 500, 100)]
#[case::divisible(3, 9, 3)]
#[case::remainder(3, 10, 4)]
#[case::interval_equals_max_move(20, 20, 1)]
#[case::interval_longer_than_max_move(40, 20, 1)]
fn full_sweep_tick_count(#[case] interval_ms: u64, #[case] max_move_ms: u64, #[case] ticks: usize) {
    let step = StepSize::new(
        Duration::from_millis(interval_ms),
        Duration::from_millis(max_move_ms),
    )
    .unwrap();
    assert_eq!(walk(0.0, 1.0, step).len(), ticks);
    assert_eq!(walk(1.0, 0.0, step).len(), ticks);
}

#[test]
fn small_move_snaps_in_one_tick() {
    let step = StepSize::new(Duration::from_millis(5), Duration::from_millis(500)).unwrap();
    assert_eq!(walk(0.0, 0.005, step), vec![0.005]);
}

#[test]
fn already_at_target_emits_nothing() {
    let step = StepSize::new(Duration::from_millis(5), Duration::from_millis(500)).unwrap();
    assert!(walk(0.4, 0.4, step).is_empty());
}

proptest! {
    #[test]
    fn steps_never_exceed_the_bound(
        interval in 1u64..50,
        extra in 0u64..2000,
        from in 0.0f64..=1.0,
        to in 0.0f64..=1.0,
    ) {
        let max_move = interval + extra;
        let step = StepSize::new(
            Duration::from_millis(interval),
            Duration::from_millis(max_move),
        ).unwrap();
        let mut prev = from;
        for p in walk(from, to, step) {
            prop_assert!((p - prev).abs() <= step.get() * (1.0 + 1e-9));
            // never overshoots
            prop_assert!(p >= from.min(to) - 1e-12 && p <= from.max(to) + 1e-12);
            prev = p;
        }
    }

    #[test]
    fn full_sweep_takes_ceil_ticks(interval in 1u64..50, extra in 0u64..2000) {
        let max_move = interval + extra;
        let step = StepSize::new(
            Duration::from_millis(interval),
            Duration::from_millis(max_move),
        ).unwrap();
        let expected = max_move.div_ceil(interval) as usize;
        prop_assert_eq!(walk(0.0, 1.0, step).len(), expected);
    }
}
