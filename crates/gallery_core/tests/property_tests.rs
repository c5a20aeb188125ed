#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use chrono::{Days, NaiveDate, Weekday};
use gallery_core::dual_slider::{Handle, RangeState};
use gallery_core::heatmap::{DayActivity, GridFiller};
use gallery_core::unit_curve::{UnitCurve, UnitPoint};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn weekday(index: u8) -> Weekday {
    match index % 7 {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// Strictly increasing dates with arbitrary gaps and counts.
fn activity_strategy() -> impl Strategy<Value = Vec<DayActivity>> {
    (0u64..20_000, prop::collection::vec((1u64..15, 0u32..40), 1..60)).prop_map(
        |(start, steps)| {
            let base = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
            let mut date = base.checked_add_days(Days::new(start)).unwrap();
            steps
                .into_iter()
                .map(|(gap, count)| {
                    date = date.checked_add_days(Days::new(gap)).unwrap();
                    DayActivity::new(date, count)
                })
                .collect()
        },
    )
}

// =============================================================================
// Grid filler properties
// =============================================================================

proptest! {
    #[test]
    fn grid_length_is_columns_times_rows(
        existing in activity_strategy(),
        columns in 1usize..20,
        rows in 1usize..10,
        week in 0u8..7,
    ) {
        let out = GridFiller::new(columns, rows)
            .week_start(weekday(week))
            .fill(&existing)
            .unwrap();
        prop_assert_eq!(out.len(), columns * rows);
    }

    #[test]
    fn grid_keeps_a_suffix_of_existing_in_order(
        existing in activity_strategy(),
        columns in 1usize..20,
        rows in 1usize..10,
    ) {
        let out = GridFiller::new(columns, rows).fill(&existing).unwrap();
        let first = existing[0].date;
        let last = existing[existing.len() - 1].date;

        let kept: Vec<_> = out
            .iter()
            .copied()
            .filter(|d| d.date >= first && d.date <= last)
            .collect();
        let dropped = existing.len() - kept.len();
        prop_assert_eq!(&kept[..], &existing[dropped..]);

        // Only leading entries are ever cut.
        if dropped > 0 {
            prop_assert_eq!(out[0], existing[dropped]);
        }
    }

    #[test]
    fn grid_placeholders_are_empty_and_outside_existing(
        existing in activity_strategy(),
        columns in 1usize..20,
        rows in 1usize..10,
    ) {
        let out = GridFiller::new(columns, rows).fill(&existing).unwrap();
        let first = existing[0].date;
        let last = existing[existing.len() - 1].date;
        for day in out.iter().filter(|d| d.date < first || d.date > last) {
            prop_assert_eq!(day.count, 0);
        }
    }

    #[test]
    fn grid_is_deterministic(
        existing in activity_strategy(),
        columns in 1usize..20,
        rows in 1usize..10,
    ) {
        let filler = GridFiller::new(columns, rows);
        prop_assert_eq!(filler.fill(&existing).unwrap(), filler.fill(&existing).unwrap());
    }
}

// =============================================================================
// Slider invariants
// =============================================================================

/// A valid starting state plus the ratio it was built for.
fn slider_strategy() -> impl Strategy<Value = (RangeState, f64)> {
    (
        prop::sample::select(vec![0.01, 0.05, 0.1, 0.25, 1.0, 5.0]),
        -10i32..10,
        10i32..200,
        0.01f64..0.3,
        0.0f64..1.0,
        0.0f64..1.0,
    )
        .prop_filter_map(
            "start state must be valid",
            |(step, offset, cells, ratio, f1, f2)| {
                let min = f64::from(offset) * step;
                let max = f64::from(offset + cells) * step;
                let span = max - min;
                let separation = ratio * span;
                let lower = min + f1 * (span - separation);
                let upper = lower + separation + f2 * (max - lower - separation);
                let state = RangeState::new(lower, upper, min..=max, step).ok()?;
                (state.upper() - state.lower() >= separation).then_some((state, ratio))
            },
        )
}

fn assert_invariants(state: &RangeState, ratio: f64) -> Result<(), TestCaseError> {
    let (min, max) = state.range();
    let eps = TOLERANCE * (max - min).max(1.0);
    prop_assert!(min - eps <= state.lower(), "lower {} below min {}", state.lower(), min);
    prop_assert!(state.lower() <= state.upper(), "handles crossed");
    prop_assert!(state.upper() <= max + eps, "upper {} above max {}", state.upper(), max);
    prop_assert!(
        state.upper() - state.lower() >= state.separation(ratio) - eps,
        "separation violated: {} < {}",
        state.upper() - state.lower(),
        state.separation(ratio)
    );
    Ok(())
}

fn on_grid(value: f64, step: f64) -> bool {
    ((value / step).round() * step - value).abs() < TOLERANCE * value.abs().max(1.0)
}

proptest! {
    #[test]
    fn slider_invariants_hold_over_drag_sequences(
        (start, ratio) in slider_strategy(),
        drags in prop::collection::vec((any::<bool>(), 0.0f64..=1.0), 1..40),
    ) {
        let mut state = start;
        for (lower, fraction) in drags {
            let handle = if lower { Handle::Lower } else { Handle::Upper };
            let next = state.on_drag(handle, fraction, ratio).unwrap();
            assert_invariants(&next, ratio)?;

            if next != state {
                let moved = next.value(handle);
                prop_assert!(on_grid(moved, next.step()), "{} not on step grid", moved);
                prop_assert_eq!(next.value(handle.other()), state.value(handle.other()));
            }
            state = next;
        }
    }

    #[test]
    fn slider_out_of_unit_fractions_behave_like_ends(
        (start, ratio) in slider_strategy(),
        over in 1.0f64..1e6,
    ) {
        prop_assert_eq!(
            start.on_drag(Handle::Upper, over, ratio).unwrap(),
            start.on_drag(Handle::Upper, 1.0, ratio).unwrap()
        );
        prop_assert_eq!(
            start.on_drag(Handle::Lower, -over, ratio).unwrap(),
            start.on_drag(Handle::Lower, 0.0, ratio).unwrap()
        );
    }
}

// =============================================================================
// Timing curve
// =============================================================================

proptest! {
    #[test]
    fn curve_hits_endpoints(
        x1 in 0.0f64..=1.0,
        y1 in -0.2f64..=1.2,
        x2 in 0.0f64..=1.0,
        y2 in -0.2f64..=1.2,
    ) {
        let curve = UnitCurve::bezier(UnitPoint::new(x1, y1), UnitPoint::new(x2, y2));
        prop_assert!(curve.value_at(0.0).abs() < 1e-6);
        prop_assert!((curve.value_at(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn curve_value_is_finite(
        x1 in 0.0f64..=1.0,
        y1 in -0.2f64..=1.2,
        x2 in 0.0f64..=1.0,
        y2 in -0.2f64..=1.2,
        t in -1.0f64..2.0,
    ) {
        let curve = UnitCurve::bezier(UnitPoint::new(x1, y1), UnitPoint::new(x2, y2));
        prop_assert!(curve.value_at(t).is_finite());
    }
}
