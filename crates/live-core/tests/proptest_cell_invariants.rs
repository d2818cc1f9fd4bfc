//! Property-based invariant tests for live cells and the operator algebra.
//!
//! 1. Clamped reads lie within the min-then-max clamp of the bounds.
//! 2. Integer operators agree with checked native arithmetic.
//! 3. Float operators agree with native IEEE arithmetic.
//! 4. Comparisons agree with native ordering.
//! 5. Live cells call their function once per read; frozen cells once total.
//! 6. Selection evaluates exactly one branch.
//! 7. A sampled constant never reports a change.

use std::cell::Cell;
use std::rc::Rc;

use live_core::{EvalError, EvaluationMode, Live, pair_operands, select_if};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = EvaluationMode> {
    prop_oneof![Just(EvaluationMode::Live), Just(EvaluationMode::Frozen)]
}

fn counting_cell(mode: EvaluationMode, value: i64) -> (Live<i64>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0usize));
    let calls_clone = Rc::clone(&calls);
    let cell = Live::from_fn(mode, move || {
        calls_clone.set(calls_clone.get() + 1);
        value
    });
    (cell, calls)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Clamp bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamped_int_within_bounds(
        raw in any::<i64>(),
        min in -1000i64..1000,
        max in -1000i64..1000,
        mode in mode_strategy(),
    ) {
        let value = Live::bounded(mode, raw, min, max).resolve();
        if min <= max {
            prop_assert!((min..=max).contains(&value), "{value} outside [{min}, {max}]");
        } else {
            prop_assert_eq!(value, min);
        }
        prop_assert_eq!(value, raw.min(max).max(min));
    }

    #[test]
    fn clamped_float_within_bounds(
        raw in -1e6f64..1e6,
        min in -10.0f64..10.0,
        span in 0.0f64..10.0,
    ) {
        let max = min + span;
        let value = Live::new(raw).with_bounds(min, max).resolve();
        prop_assert!(value >= min && value <= max);
    }

    #[test]
    fn unlimited_reads_are_raw(raw in any::<i64>(), min in any::<i64>(), max in any::<i64>()) {
        let cell = Live::new(raw);
        cell.set_min(min);
        cell.set_max(max);
        prop_assert_eq!(cell.resolve(), raw);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Algebra agrees with native operators
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn int_algebra_matches_checked_native(a in any::<i64>(), b in any::<i64>()) {
        let (la, lb) = (Live::new(a), Live::new(b));

        prop_assert_eq!((&la + &lb).try_resolve().ok(), a.checked_add(b));
        prop_assert_eq!((&la - &lb).try_resolve().ok(), a.checked_sub(b));
        prop_assert_eq!((&la * &lb).try_resolve().ok(), a.checked_mul(b));
        prop_assert_eq!((-&la).try_resolve().ok(), a.checked_neg());
        prop_assert_eq!(la.min_with(&lb).resolve(), a.min(b));
        prop_assert_eq!(la.max_with(&lb).resolve(), a.max(b));

        let quotient = (&la / &lb).try_resolve();
        if b == 0 {
            prop_assert_eq!(quotient, Err(EvalError::DivisionByZero { operation: "div" }));
        } else {
            prop_assert_eq!(quotient.ok(), a.checked_div(b));
        }
    }

    #[test]
    fn float_algebra_matches_native(a in -1e9f64..1e9, b in -1e9f64..1e9) {
        let (la, lb) = (Live::new(a), Live::new(b));

        prop_assert_eq!((&la + &lb).resolve(), a + b);
        prop_assert_eq!((&la - &lb).resolve(), a - b);
        prop_assert_eq!((&la * &lb).resolve(), a * b);
        prop_assert_eq!((-&la).resolve(), -a);
        let quotient = (&la / &lb).resolve();
        prop_assert!(quotient == a / b || (quotient.is_nan() && (a / b).is_nan()));
    }

    #[test]
    fn comparisons_match_native(a in any::<i64>(), b in any::<i64>()) {
        let (la, lb) = (Live::new(a), Live::new(b));

        prop_assert_eq!(la.lt(&lb).resolve(), a < b);
        prop_assert_eq!(la.le(&lb).resolve(), a <= b);
        prop_assert_eq!(la.gt(&lb).resolve(), a > b);
        prop_assert_eq!(la.ge(&lb).resolve(), a >= b);
        prop_assert_eq!(la.eq_live(&lb).resolve(), a == b);
        prop_assert_eq!(la.ne_live(&lb).resolve(), a != b);
    }

    #[test]
    fn boolean_algebra_matches_native(a in any::<bool>(), b in any::<bool>()) {
        let (la, lb) = (Live::new(a), Live::new(b));

        prop_assert_eq!(la.and(&lb).resolve(), a && b);
        prop_assert_eq!(la.or(&lb).resolve(), a || b);
        prop_assert_eq!(la.negate().resolve(), !a);
        prop_assert_eq!(la.eq_live(&lb).resolve(), a == b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Call counting
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn live_reads_call_once_each(value in any::<i64>(), reads in 0usize..32) {
        let (cell, calls) = counting_cell(EvaluationMode::Live, value);
        for _ in 0..reads {
            prop_assert_eq!(cell.resolve(), value);
        }
        prop_assert_eq!(calls.get(), reads);
    }

    #[test]
    fn frozen_calls_once(value in any::<i64>(), reads in 0usize..32) {
        let (cell, calls) = counting_cell(EvaluationMode::Frozen, value);
        for _ in 0..reads {
            prop_assert_eq!(cell.resolve(), value);
        }
        prop_assert_eq!(calls.get(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Selection evaluates one branch
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn select_reads_one_branch(condition in any::<bool>(), a in any::<i64>(), b in any::<i64>()) {
        let (when_true, true_calls) = counting_cell(EvaluationMode::Live, a);
        let (when_false, false_calls) = counting_cell(EvaluationMode::Live, b);

        let picked = select_if(&Live::new(condition), pair_operands(&when_true, &when_false));
        let expected = if condition { a } else { b };
        prop_assert_eq!(picked.resolve(), expected);
        prop_assert_eq!(true_calls.get() + false_calls.get(), 1);
        prop_assert_eq!(true_calls.get() == 1, condition);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Change detection on constants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sampled_constant_is_unchanged(value in any::<i64>(), mode in mode_strategy()) {
        let cell = Live::constant(mode, value);
        prop_assert!(cell.has_changed());
        prop_assert_eq!(cell.sample(), value);
        prop_assert!(!cell.has_changed());
        prop_assert_eq!(cell.sample_if_changed(), None);
    }
}
