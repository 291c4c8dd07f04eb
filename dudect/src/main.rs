//! Timing-leakage tests for `ct-decompose`.
//!
//! These use the `dudect_bencher` crate to compare a fixed-input class
//! against a random-input class. The `_ct` benches should stay under the
//! t-test threshold; the `_vartime` benches are the positive control and are
//! expected to leak wherever hardware division is variable-latency.

use ct_decompose::{
    GAMMA2_32, Q, decompose, use_hint,
    vartime::{decompose_vartime, use_hint_vartime},
};
use dudect_bencher::{BenchRng, Class, CtRunner, ctbench_main};
use rand::Rng;
use std::hint::black_box;

const ITERATIONS_OUTER: usize = 10_000;
const ITERATIONS_INNER: usize = 1_000;

/// Left: a low part of zero, one side of every select. Right: uniform in `[0, q)`.
fn coefficient_inputs(rng: &mut BenchRng) -> Vec<(Class, u32)> {
    let mut inputs = Vec::with_capacity(2 * ITERATIONS_OUTER);

    for _ in 0..ITERATIONS_OUTER {
        inputs.push((Class::Left, 0));
    }

    for _ in 0..ITERATIONS_OUTER {
        inputs.push((Class::Right, rng.gen_range(0..Q)));
    }

    inputs
}

/// Left: hint cleared. Right: random coefficient with the hint set.
fn hint_inputs(rng: &mut BenchRng) -> Vec<(Class, u32, u32)> {
    let mut inputs = Vec::with_capacity(2 * ITERATIONS_OUTER);

    for _ in 0..ITERATIONS_OUTER {
        inputs.push((Class::Left, 0, 0));
    }

    for _ in 0..ITERATIONS_OUTER {
        inputs.push((Class::Right, rng.gen_range(0..Q), 1));
    }

    inputs
}

/// Check `decompose` for constant-time operation.
fn decompose_ct(runner: &mut CtRunner, rng: &mut BenchRng) {
    for (class, r) in coefficient_inputs(rng) {
        runner.run_one(class, || {
            for _ in 0..ITERATIONS_INNER {
                black_box(decompose(black_box(r), black_box(GAMMA2_32)));
            }
        })
    }
}

/// Positive control: `decompose_vartime` divides and branches on `r`.
fn decompose_vt(runner: &mut CtRunner, rng: &mut BenchRng) {
    for (class, r) in coefficient_inputs(rng) {
        runner.run_one(class, || {
            for _ in 0..ITERATIONS_INNER {
                black_box(decompose_vartime(
                    black_box(r as i32),
                    black_box(GAMMA2_32 as i32),
                ));
            }
        })
    }
}

/// Check `use_hint` for constant-time operation in both the coefficient and
/// the hint bit.
fn use_hint_ct(runner: &mut CtRunner, rng: &mut BenchRng) {
    for (class, r, hint) in hint_inputs(rng) {
        runner.run_one(class, || {
            for _ in 0..ITERATIONS_INNER {
                black_box(use_hint(black_box(r), black_box(hint), black_box(GAMMA2_32)));
            }
        })
    }
}

/// Positive control: `use_hint_vartime` returns early on a cleared hint.
fn use_hint_vt(runner: &mut CtRunner, rng: &mut BenchRng) {
    for (class, r, hint) in hint_inputs(rng) {
        runner.run_one(class, || {
            for _ in 0..ITERATIONS_INNER {
                black_box(use_hint_vartime(
                    black_box(r as i32),
                    black_box(hint as i32),
                    black_box(GAMMA2_32 as i32),
                ));
            }
        })
    }
}

ctbench_main!(decompose_ct, decompose_vt, use_hint_ct, use_hint_vt);
