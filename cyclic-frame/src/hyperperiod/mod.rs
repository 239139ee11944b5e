/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Hyperperiod calculation.
//!
//! The hyperperiod of a set of periodic tasks is the Least Common Multiple
//! (LCM) of all their periods.  It is the smallest window after which the
//! whole task set repeats, and every admissible frame size must divide it.
//!
//! Every failure mode is a distinct [`HyperperiodError`] variant so callers
//! never have to guess whether a `0` meant "no tasks" or "overflow".

pub mod math;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::task::TaskSet;
use math::lcm_of_slice;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default upper limit on the hyperperiod, in time units.
///
/// Divisor enumeration costs `O(√H)`, so `10^12` keeps the candidate scan at
/// about a million iterations.  Callers that want a different limit can use
/// [`HyperperiodCalculator::with_limit`].
pub const DEFAULT_HYPERPERIOD_LIMIT: u64 = 1_000_000_000_000;

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors that can occur during hyperperiod calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HyperperiodError {
    /// The period sequence was empty; the hyperperiod is undefined.
    #[error("no periods supplied, the hyperperiod of an empty task set is undefined")]
    EmptyInput,

    /// A period was not a positive integer.
    #[error("invalid period {value}: periods must be positive integers")]
    InvalidPeriod { value: u64 },

    /// LCM calculation overflowed `u64`.
    ///
    /// Contains the two operands that caused the overflow so the caller can
    /// log a useful message.
    #[error("LCM overflow computing lcm({a}, {b})")]
    Overflow { a: u64, b: u64 },

    /// The calculated hyperperiod exceeded the configured limit.
    #[error("hyperperiod {value} exceeds limit {limit}")]
    TooLarge { value: u64, limit: u64 },
}

// ── HyperperiodInfo ───────────────────────────────────────────────────────────

/// Calculated hyperperiod for one task set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HyperperiodInfo {
    /// LCM of all task periods.
    pub hyperperiod: u64,

    /// Unique periods present in the task set (sorted, deduplicated).
    pub unique_periods: Vec<u64>,

    /// Number of periods (tasks) that contributed to this hyperperiod.
    pub task_count: usize,
}

// ── HyperperiodCalculator ─────────────────────────────────────────────────────

/// Folds `lcm` across task periods, subject to an upper limit.
///
/// Holds no per-call state, so one calculator can serve any number of task
/// sets, from any number of threads.
///
/// # Example
/// ```rust
/// use cyclic_frame::hyperperiod::HyperperiodCalculator;
///
/// let calc = HyperperiodCalculator::new();
/// let info = calc.calculate(&[4, 5]).unwrap();
/// assert_eq!(info.hyperperiod, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyperperiodCalculator {
    /// A calculated value above this limit yields
    /// [`HyperperiodError::TooLarge`].
    limit: u64,
}

impl HyperperiodCalculator {
    /// Create a calculator with [`DEFAULT_HYPERPERIOD_LIMIT`].
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_HYPERPERIOD_LIMIT,
        }
    }

    /// Create a calculator with a custom hyperperiod limit.
    pub fn with_limit(limit: u64) -> Self {
        Self { limit }
    }

    /// The configured upper limit.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Calculate the hyperperiod of `periods`.
    ///
    /// The result does not depend on the order of `periods`.
    ///
    /// # Errors
    /// * [`HyperperiodError::EmptyInput`] for an empty slice.
    /// * [`HyperperiodError::InvalidPeriod`] if any period is `0`.
    /// * [`HyperperiodError::Overflow`] if the LCM exceeds `u64`.
    /// * [`HyperperiodError::TooLarge`] if the result exceeds the limit.
    pub fn calculate(&self, periods: &[u64]) -> Result<HyperperiodInfo, HyperperiodError> {
        if periods.is_empty() {
            warn!("Hyperperiod requested for an empty period sequence");
            return Err(HyperperiodError::EmptyInput);
        }
        if let Some(&value) = periods.iter().find(|&&p| p == 0) {
            warn!(value, "Rejecting non-positive period");
            return Err(HyperperiodError::InvalidPeriod { value });
        }

        // Sorted for deterministic output; duplicates do not change the LCM.
        let unique_periods: Vec<u64> = {
            let mut v = periods.to_vec();
            v.sort_unstable();
            v.dedup();
            v
        };

        let hyperperiod = lcm_of_slice(&unique_periods)?;

        if hyperperiod > self.limit {
            warn!(
                hyperperiod,
                limit = self.limit,
                "Hyperperiod exceeds configured limit"
            );
            return Err(HyperperiodError::TooLarge {
                value: hyperperiod,
                limit: self.limit,
            });
        }

        info!(
            task_count = periods.len(),
            unique_count = unique_periods.len(),
            hyperperiod,
            "Calculated hyperperiod"
        );
        for p in &unique_periods {
            debug!(period = p, "  unique period");
        }

        Ok(HyperperiodInfo {
            hyperperiod,
            unique_periods,
            task_count: periods.len(),
        })
    }

    /// Calculate the hyperperiod of every period in `tasks`.
    pub fn calculate_for(&self, tasks: &TaskSet) -> Result<HyperperiodInfo, HyperperiodError> {
        self.calculate(&tasks.periods())
    }
}

impl Default for HyperperiodCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Hyperperiod of `periods` with no upper limit applied.
///
/// Shorthand for the common case where only the number is wanted.
pub fn hyperperiod(periods: &[u64]) -> Result<u64, HyperperiodError> {
    HyperperiodCalculator::with_limit(u64::MAX)
        .calculate(periods)
        .map(|info| info.hyperperiod)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    // ── calculate ─────────────────────────────────────────────────────────────

    #[test]
    fn basic_hyperperiod_two_periods() {
        let info = HyperperiodCalculator::new().calculate(&[4, 5]).unwrap();
        assert_eq!(info.hyperperiod, 20);
        assert_eq!(info.task_count, 2);
    }

    #[test]
    fn hyperperiod_three_periods_lcm() {
        let info = HyperperiodCalculator::new()
            .calculate(&[15, 20, 22])
            .unwrap();
        assert_eq!(info.hyperperiod, 660);
    }

    #[test]
    fn hyperperiod_all_same_period() {
        let info = HyperperiodCalculator::new()
            .calculate(&[5, 5, 5])
            .unwrap();
        assert_eq!(info.hyperperiod, 5);
        // Three tasks but only one unique period
        assert_eq!(info.unique_periods, vec![5]);
        assert_eq!(info.task_count, 3);
    }

    #[test]
    fn hyperperiod_single_period_is_that_period() {
        for p in [1u64, 7, 10, 4_000] {
            assert_eq!(hyperperiod(&[p]).unwrap(), p);
        }
    }

    #[test]
    fn hyperperiod_is_independent_of_order() {
        let periods = [6u64, 4, 10, 15, 9];
        let expected = hyperperiod(&periods).unwrap();
        assert_eq!(expected, 180);

        // every rotation and the reversal
        for k in 0..periods.len() {
            let mut rotated = periods.to_vec();
            rotated.rotate_left(k);
            assert_eq!(hyperperiod(&rotated).unwrap(), expected);
            rotated.reverse();
            assert_eq!(hyperperiod(&rotated).unwrap(), expected);
        }
    }

    #[test]
    fn unique_periods_are_sorted_and_deduped() {
        let info = HyperperiodCalculator::new()
            .calculate(&[5, 1, 5, 2])
            .unwrap();
        assert_eq!(info.unique_periods, vec![1, 2, 5]);
        assert_eq!(info.task_count, 4);
    }

    // ── errors ────────────────────────────────────────────────────────────────

    #[test]
    fn empty_periods_returns_empty_input_error() {
        let result = HyperperiodCalculator::new().calculate(&[]);
        assert_eq!(result.unwrap_err(), HyperperiodError::EmptyInput);
    }

    #[test]
    fn zero_period_returns_invalid_period_error() {
        let result = HyperperiodCalculator::new().calculate(&[4, 0, 5]);
        assert_eq!(
            result.unwrap_err(),
            HyperperiodError::InvalidPeriod { value: 0 }
        );
    }

    #[test]
    fn overflow_is_reported() {
        let huge = u64::MAX / 2 + 1;
        let result = hyperperiod(&[huge, huge - 1]);
        assert!(matches!(result, Err(HyperperiodError::Overflow { .. })));
    }

    // ── limit ─────────────────────────────────────────────────────────────────

    #[test]
    fn hyperperiod_exceeding_limit_returns_too_large_error() {
        let calc = HyperperiodCalculator::with_limit(50);
        let result = calc.calculate(&[7, 10]);
        assert_eq!(
            result.unwrap_err(),
            HyperperiodError::TooLarge {
                value: 70,
                limit: 50
            }
        );
    }

    #[test]
    fn hyperperiod_at_exactly_the_limit_is_accepted() {
        let calc = HyperperiodCalculator::with_limit(70);
        assert_eq!(calc.calculate(&[7, 10]).unwrap().hyperperiod, 70);
    }

    #[test]
    fn default_limit_is_applied() {
        assert_eq!(HyperperiodCalculator::default().limit(), DEFAULT_HYPERPERIOD_LIMIT);
    }

    // ── calculate_for ─────────────────────────────────────────────────────────

    #[test]
    fn calculate_for_uses_task_periods() {
        let tasks = TaskSet::new(vec![
            Task::new(4, 1.0, None),
            Task::new(5, 2.0, None),
        ])
        .unwrap();
        let info = HyperperiodCalculator::new().calculate_for(&tasks).unwrap();
        assert_eq!(info.hyperperiod, 20);
        assert_eq!(info.unique_periods, vec![4, 5]);
    }
}
