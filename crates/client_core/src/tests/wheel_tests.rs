use super::*;

use std::collections::BTreeMap;

use shared::domain::{Coordinates, VenueId};

fn venues(count: usize) -> Vec<Venue> {
    (0..count)
        .map(|i| {
            let name = format!("Venue {i}");
            let mut tags = BTreeMap::new();
            tags.insert("name".to_string(), name.clone());
            Venue::new(
                VenueId(format!("node/{i}")),
                name,
                Coordinates::new(13.75, 100.5),
                tags,
                10.0 * i as f64,
            )
        })
        .collect()
}

fn loaded_wheel(count: usize) -> (SelectorWheel<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut wheel = SelectorWheel::new(clock.clone());
    wheel.load(&venues(count)).expect("load");
    (wheel, clock)
}

#[test]
fn ease_out_is_monotonic_between_zero_and_one() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    let samples: Vec<f64> = (0..=100).map(|i| ease_out_cubic(i as f64 / 100.0)).collect();
    assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn total_rotation_spans_five_turns_plus_offset() {
    let min = total_rotation(0.0);
    let max = total_rotation(0.999_999);
    assert!((min - (10.0 * std::f64::consts::PI + FRAC_PI_2)).abs() < 1e-9);
    assert!(max < min + TAU);
}

#[test]
fn winning_index_stays_in_range() {
    for count in 1..=12 {
        for step in 0..500 {
            let unit = step as f64 / 500.0;
            let index = winning_index(total_rotation(unit), count);
            assert!(index < count, "count={count} unit={unit} index={index}");
        }
    }
}

#[test]
fn single_slice_always_wins() {
    for step in 0..100 {
        assert_eq!(winning_index(total_rotation(step as f64 / 100.0), 1), 0);
    }
}

#[test]
fn pinned_rotation_resolves_reproducibly() {
    assert_eq!(winning_index(total_rotation(0.3), 4), 2);
    assert_eq!(winning_index(total_rotation(0.3), 4), 2);
    assert_eq!(winning_index(total_rotation(0.1), 4), 3);
    assert_eq!(winning_index(total_rotation(0.6), 3), 1);
}

#[test]
fn slices_partition_the_circle_and_cycle_colors() {
    let (wheel, _clock) = loaded_wheel(12);
    let slices = wheel.slices();
    assert_eq!(slices.len(), 12);
    assert_eq!(slices[0].start_angle, 0.0);
    assert!((slices[11].end_angle - TAU).abs() < 1e-9);
    for pair in slices.windows(2) {
        assert!((pair[0].end_angle - pair[1].start_angle).abs() < 1e-12);
    }
    assert_eq!(slices[10].color, PALETTE[0]);
    assert_eq!(slices[3].label, "Venue 3");
}

#[test]
fn spin_animates_then_resolves_winner() {
    let (mut wheel, clock) = loaded_wheel(4);

    let outcome = wheel.spin(&mut FixedRandom(0.3)).expect("spin");
    let SpinOutcome::Started { total_rotation } = outcome else {
        panic!("expected a new spin, got {outcome:?}");
    };
    assert_eq!(wheel.phase(), WheelPhase::Spinning);

    let mut last = wheel.tick().rotation;
    assert_eq!(last, 0.0);
    for _ in 0..49 {
        clock.advance(Duration::from_millis(100));
        let frame = wheel.tick();
        assert!(frame.finished.is_none());
        assert!(frame.rotation >= last);
        assert!(frame.rotation < total_rotation);
        last = frame.rotation;
    }

    clock.advance(Duration::from_millis(100));
    let frame = wheel.tick();
    let result = frame.finished.expect("winner");
    assert_eq!(frame.rotation, total_rotation);
    assert_eq!(result.index, 2);
    assert_eq!(result.venue.name, "Venue 2");
    assert_eq!(result.announcement.name, "Venue 2");
    assert_eq!(wheel.phase(), WheelPhase::Idle);

    let after = wheel.tick();
    assert!(after.finished.is_none());
    assert_eq!(after.rotation, total_rotation);
}

#[test]
fn spin_while_spinning_is_a_no_op() {
    let (mut wheel, clock) = loaded_wheel(3);
    wheel.spin(&mut FixedRandom(0.6)).expect("spin");
    clock.advance(Duration::from_millis(1000));

    let again = wheel.spin(&mut FixedRandom(0.0)).expect("spin");
    assert_eq!(again, SpinOutcome::AlreadySpinning);

    clock.advance(Duration::from_millis(4000));
    let result = wheel.tick().finished.expect("winner");
    assert_eq!(result.index, 1);
}

#[test]
fn single_venue_wheel_resolves_to_it() {
    let (mut wheel, clock) = loaded_wheel(1);
    wheel.spin(&mut ThreadRandom).expect("spin");
    clock.advance(SPIN_DURATION);
    let result = wheel.tick().finished.expect("winner");
    assert_eq!(result.index, 0);
}

#[test]
fn empty_wheel_refuses_to_spin() {
    let mut wheel = SelectorWheel::new(ManualClock::new());
    assert_eq!(wheel.spin(&mut FixedRandom(0.5)), Err(WheelError::NoVenues));
}

#[test]
fn loading_is_refused_mid_spin_and_snapshots_input() {
    let mut source = venues(3);
    let (mut wheel, clock) = {
        let clock = ManualClock::new();
        let mut wheel = SelectorWheel::new(clock.clone());
        wheel.load(&source).expect("load");
        (wheel, clock)
    };

    source.clear();
    assert_eq!(wheel.venues().len(), 3);

    wheel.spin(&mut FixedRandom(0.6)).expect("spin");
    assert_eq!(wheel.load(&venues(5)), Err(WheelError::Busy));

    clock.advance(SPIN_DURATION);
    assert!(wheel.tick().finished.is_some());
    wheel.load(&venues(5)).expect("load after spin");
    assert_eq!(wheel.venues().len(), 5);
}

#[test]
fn zero_duration_spin_finishes_on_first_tick() {
    let mut wheel = SelectorWheel::with_duration(ManualClock::new(), Duration::ZERO);
    wheel.load(&venues(2)).expect("load");
    wheel.spin(&mut FixedRandom(0.25)).expect("spin");
    assert!(wheel.tick().finished.is_some());
}
