#![forbid(unsafe_code)]

//! Frame counter.

use std::cell::Cell;

use live_core::{EvaluationMode, Live};

/// A counter that increments on every read; the first read returns 1.
///
/// The count lives in the cell's own closure, so each call starts a fresh
/// counter. In frozen mode the single construction-time read yields 1.
pub fn frame_index(mode: EvaluationMode) -> Live<i64> {
    let index = Cell::new(0i64);
    Live::from_fn(mode, move || {
        let next = index.get().saturating_add(1);
        index.set(next);
        next
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_reads() {
        let frame = frame_index(EvaluationMode::Live);
        assert_eq!(frame.resolve(), 1);
        assert_eq!(frame.resolve(), 2);
        assert_eq!(frame.resolve(), 3);
    }

    #[test]
    fn counters_are_independent() {
        let a = frame_index(EvaluationMode::Live);
        let b = frame_index(EvaluationMode::Live);
        assert_eq!(a.resolve(), 1);
        assert_eq!(a.resolve(), 2);
        assert_eq!(b.resolve(), 1);
    }

    #[test]
    fn frozen_counter_stays_at_one() {
        let frame = frame_index(EvaluationMode::Frozen);
        assert_eq!(frame.resolve(), 1);
        assert_eq!(frame.resolve(), 1);
    }

    #[test]
    fn change_detection_sees_every_frame() {
        let frame = frame_index(EvaluationMode::Live);
        assert_eq!(frame.sample(), 1);
        assert!(frame.has_changed());
        assert_eq!(frame.sample_if_changed(), Some(3));
    }
}
