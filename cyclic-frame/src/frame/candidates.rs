/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Frame-size candidate generation.
//!
//! A frame size `f` is only worth checking against the deadline condition if
//! it already satisfies the first two necessary conditions:
//!
//! 1. `f ≥ max(e_i)`: a job never has to be split across frames;
//! 2. `H mod f == 0`: frames tile the hyperperiod exactly.

use crate::hyperperiod::math::divisors;

/// Divisors of `hyperperiod` that are at least `max_execution_time`, largest
/// first.
///
/// The descending order encodes the "prefer larger frames" policy: the
/// feasibility scan stops at the first candidate that passes, which is then
/// the largest feasible frame.
///
/// Empty when no divisor qualifies, e.g. when `max_execution_time` exceeds
/// the hyperperiod.
pub fn frame_candidates(hyperperiod: u64, max_execution_time: f64) -> Vec<u64> {
    let mut candidates: Vec<u64> = divisors(hyperperiod)
        .into_iter()
        .filter(|&d| d as f64 >= max_execution_time)
        .collect();
    candidates.reverse();
    candidates
}

// ── Tests ─────────────────────────────────────────────────────────────────────
