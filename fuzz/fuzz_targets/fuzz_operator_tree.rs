#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use live_core::{EvaluationMode, Live, pair_operands};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzMode {
    Live,
    Frozen,
}

impl From<FuzzMode> for EvaluationMode {
    fn from(mode: FuzzMode) -> Self {
        match mode {
            FuzzMode::Live => EvaluationMode::Live,
            FuzzMode::Frozen => EvaluationMode::Frozen,
        }
    }
}

/// One step of a stack program over integer cells.
#[derive(Arbitrary, Debug)]
enum FuzzOp {
    Push(FuzzMode, i64),
    PushFloat(FuzzMode, f64),
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Min,
    Max,
    Select,
    Bound(i64, i64),
    Unbind,
    Rebind(i64),
}

fn pop2(stack: &mut Vec<Live<i64>>) -> Option<(Live<i64>, Live<i64>)> {
    let rhs = stack.pop()?;
    let lhs = stack.pop()?;
    Some((lhs, rhs))
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    let mut stack: Vec<Live<i64>> = Vec::new();
    for op in ops.into_iter().take(256) {
        match op {
            FuzzOp::Push(mode, v) => stack.push(Live::constant(mode.into(), v)),
            FuzzOp::PushFloat(mode, v) => {
                stack.push(Live::constant(mode.into(), v).to_int());
            }
            FuzzOp::Neg => {
                if let Some(top) = stack.pop() {
                    stack.push(-top);
                }
            }
            FuzzOp::Bound(min, max) => {
                if let Some(top) = stack.pop() {
                    stack.push(top.with_bounds(min, max));
                }
            }
            FuzzOp::Unbind => {
                if let Some(top) = stack.last() {
                    top.set_limit(false);
                }
            }
            FuzzOp::Rebind(v) => {
                // Binding reads the current value, which panics on a fault.
                if let Some(top) = stack.last().filter(|top| top.try_resolve().is_ok()) {
                    top.bind().set(v);
                }
            }
            binary => {
                let Some((lhs, rhs)) = pop2(&mut stack) else {
                    continue;
                };
                let out = match binary {
                    FuzzOp::Add => &lhs + &rhs,
                    FuzzOp::Sub => &lhs - &rhs,
                    FuzzOp::Mul => &lhs * &rhs,
                    FuzzOp::Div => &lhs / &rhs,
                    FuzzOp::Min => lhs.min_with(&rhs),
                    FuzzOp::Max => lhs.max_with(&rhs),
                    _ => lhs.is_positive().select(pair_operands(&lhs, &rhs)),
                };
                stack.push(out);
            }
        }
    }

    for cell in &stack {
        let _ = cell.to_string();
        let _ = cell.depth();
        if cell.try_resolve().is_ok() {
            let sampled = cell.sample();
            assert!(!cell.has_changed());
            assert_eq!(cell.last_sample(), Some(sampled));
        }
    }
});
