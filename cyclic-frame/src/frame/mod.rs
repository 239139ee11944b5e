/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Largest feasible frame size for a cyclic (frame-based) scheduler.
//!
//! [`FrameSolver`] runs the classical three-condition search:
//!
//! ```text
//! TaskSet ──► hyperperiod H ──► divisors of H with f ≥ max(e_i), descending
//!                                   │
//!                                   ▼
//!                 first f with 2f − gcd(P_i, f) ≤ D_i for every task
//! ```
//!
//! The result is a [`FeasibilityResult`]: either the winning frame size with
//! the per-task checks that justify it, or the list of candidates that were
//! all rejected.  [`FrameSolver::analyse`] additionally keeps every trial so a
//! presentation layer can show the full derivation without recomputing it.
//!
//! # Example
//! ```rust
//! use cyclic_frame::frame::solve;
//! use cyclic_frame::task::{Task, TaskSet};
//!
//! let tasks = TaskSet::new(vec![
//!     Task::new(4, 1.0, Some(4.0)),
//!     Task::new(5, 2.0, Some(5.0)),
//! ])
//! .unwrap();
//!
//! let result = solve(&tasks).unwrap();
//! assert_eq!(result.frame_size(), Some(2));
//! assert_eq!(result.hyperperiod(), 20);
//! ```

pub mod candidates;
pub mod error;
pub mod feasibility;

pub use candidates::frame_candidates;
pub use error::SolveError;
pub use feasibility::{CandidateTrial, TaskCheck};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::SolverConfig;
use crate::hyperperiod::{HyperperiodCalculator, HyperperiodInfo};
use crate::task::{DomainPolicy, TaskSet};

// ── Result types ──────────────────────────────────────────────────────────────

/// Answer to "what is the largest feasible frame size?".
///
/// Infeasibility is a valid answer, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeasibilityResult {
    /// `frame_size` is the largest frame satisfying all three conditions.
    Feasible {
        frame_size: u64,
        hyperperiod: u64,
        /// One passing check per task, in task order.
        per_task_checks: Vec<TaskCheck>,
    },
    /// Every candidate was rejected (possibly because there were none).
    Infeasible {
        hyperperiod: u64,
        /// Descending; empty when no divisor of `H` reached `max(e_i)`.
        candidates_tried: Vec<u64>,
    },
}

impl FeasibilityResult {
    pub fn is_feasible(&self) -> bool {
        matches!(self, FeasibilityResult::Feasible { .. })
    }

    /// The winning frame size, if any.
    pub fn frame_size(&self) -> Option<u64> {
        match self {
            FeasibilityResult::Feasible { frame_size, .. } => Some(*frame_size),
            FeasibilityResult::Infeasible { .. } => None,
        }
    }

    pub fn hyperperiod(&self) -> u64 {
        match self {
            FeasibilityResult::Feasible { hyperperiod, .. }
            | FeasibilityResult::Infeasible { hyperperiod, .. } => *hyperperiod,
        }
    }
}

/// Full derivation of one solve: inputs to each step plus the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub tasks: TaskSet,
    pub hyperperiod: HyperperiodInfo,
    /// `max(e_i)`, the lower bound on the frame size.
    pub max_execution_time: f64,
    /// Frame sizes satisfying the first two conditions, descending.
    pub candidates: Vec<u64>,
    /// Deadline checks in the order they ran.
    pub trials: Vec<CandidateTrial>,
    pub result: FeasibilityResult,
}

// ── FrameSolver ───────────────────────────────────────────────────────────────

/// The frame-size solver.
///
/// Holds only immutable settings, so it is `Send + Sync` and one instance can
/// serve independent task sets concurrently.  All per-solve state lives on the
/// stack of [`analyse`](Self::analyse).
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSolver {
    hyperperiod: HyperperiodCalculator,
    domain_policy: DomainPolicy,
}

impl FrameSolver {
    /// Create a solver from explicit settings.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            hyperperiod: HyperperiodCalculator::with_limit(config.hyperperiod_limit),
            domain_policy: config.domain_policy,
        }
    }

    /// Find the largest feasible frame size for `tasks`.
    ///
    /// # Errors
    /// See [`SolveError`].  An infeasible task set is `Ok(Infeasible { .. })`.
    pub fn solve(&self, tasks: &TaskSet) -> Result<FeasibilityResult, SolveError> {
        self.analyse(tasks).map(|a| a.result)
    }

    /// Like [`solve`](Self::solve), but keep the whole derivation.
    pub fn analyse(&self, tasks: &TaskSet) -> Result<Analysis, SolveError> {
        tasks.check_domain(self.domain_policy)?;

        let info = self.hyperperiod.calculate_for(tasks)?;
        let h = info.hyperperiod;
        let e_max = tasks.max_execution_time();

        let candidates = frame_candidates(h, e_max);
        info!(
            hyperperiod = h,
            max_execution_time = e_max,
            candidate_count = candidates.len(),
            "Frame size candidates"
        );
        if candidates.is_empty() {
            warn!(
                hyperperiod = h,
                max_execution_time = e_max,
                "No divisor of the hyperperiod can hold the longest job"
            );
        }

        let search = feasibility::search(&candidates, tasks);

        let result = match search.winner() {
            Some(winner) => {
                info!(frame_size = winner.frame_size, hyperperiod = h, "Feasible frame size found");
                FeasibilityResult::Feasible {
                    frame_size: winner.frame_size,
                    hyperperiod: h,
                    per_task_checks: winner.checks.clone(),
                }
            }
            None => {
                warn!(
                    hyperperiod = h,
                    tried = search.trials.len(),
                    "No feasible frame size"
                );
                FeasibilityResult::Infeasible {
                    hyperperiod: h,
                    candidates_tried: search.tried(),
                }
            }
        };

        Ok(Analysis {
            tasks: tasks.clone(),
            hyperperiod: info,
            max_execution_time: e_max,
            candidates,
            trials: search.trials,
            result,
        })
    }
}

/// Solve `tasks` with the default [`SolverConfig`].
pub fn solve(tasks: &TaskSet) -> Result<FeasibilityResult, SolveError> {
    FrameSolver::default().solve(tasks)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperperiod::math::divisors;
    use crate::hyperperiod::HyperperiodError;
    use crate::task::{Task, ValidationError};

    fn set(tasks: &[(u64, f64, Option<f64>)]) -> TaskSet {
        TaskSet::new(tasks.iter().map(|&(p, e, d)| Task::new(p, e, d)).collect()).unwrap()
    }

    /// Reference answer: scan *all* divisors, largest first, no `e_max` filter.
    fn unfiltered_answer(tasks: &TaskSet) -> Option<u64> {
        let h = crate::hyperperiod::hyperperiod(&tasks.periods()).unwrap();
        let mut all = divisors(h);
        all.reverse();
        feasibility::search(&all, tasks)
            .winner()
            .map(|t| t.frame_size)
    }

    // ── worked scenarios ──────────────────────────────────────────────────────

    #[test]
    fn scenario_two_tasks_picks_frame_two() {
        let tasks = set(&[(4, 1.0, Some(4.0)), (5, 2.0, Some(5.0))]);
        let a = FrameSolver::default().analyse(&tasks).unwrap();

        assert_eq!(a.hyperperiod.hyperperiod, 20);
        assert_eq!(a.max_execution_time, 2.0);
        assert_eq!(a.candidates, vec![20, 10, 5, 4, 2]);
        assert_eq!(a.trials.len(), 5);

        match &a.result {
            FeasibilityResult::Feasible {
                frame_size,
                hyperperiod,
                per_task_checks,
            } => {
                assert_eq!(*frame_size, 2);
                assert_eq!(*hyperperiod, 20);
                let lhs: Vec<u64> = per_task_checks.iter().map(|c| c.lhs).collect();
                assert_eq!(lhs, vec![2, 3]);
                assert!(per_task_checks.iter().all(|c| c.passed));
                assert_eq!(per_task_checks[1].task_index, 2);
            }
            other => panic!("expected feasible, got {other:?}"),
        }
    }

    #[test]
    fn textbook_four_task_set() {
        // T1(4,1) T2(5,1.8) T3(20,1) T4(20,2): H = 20, f = 2
        let tasks = set(&[
            (4, 1.0, None),
            (5, 1.8, None),
            (20, 1.0, None),
            (20, 2.0, None),
        ]);
        let result = solve(&tasks).unwrap();
        assert_eq!(result.frame_size(), Some(2));
        assert_eq!(result.hyperperiod(), 20);
    }

    #[test]
    fn three_tasks_with_constrained_deadlines() {
        // T1(15,1,14) T2(20,2,26) T3(22,3,22): H = 660, f = 6
        // (f = 11 already fails T1: 22 - gcd(15, 11) = 21 > 14)
        let tasks = set(&[
            (15, 1.0, Some(14.0)),
            (20, 2.0, Some(26.0)),
            (22, 3.0, Some(22.0)),
        ]);
        let result = solve(&tasks).unwrap();
        assert_eq!(result.hyperperiod(), 660);
        assert_eq!(result.frame_size(), Some(6));
    }

    #[test]
    fn single_task_frame_equals_period() {
        for (p, e) in [(10u64, 3.0), (7, 7.0), (12, 0.5)] {
            let tasks = set(&[(p, e, None)]);
            let result = solve(&tasks).unwrap();
            assert_eq!(result.hyperperiod(), p);
            assert_eq!(result.frame_size(), Some(p), "period {p}");
        }
    }

    // ── infeasible outcomes ───────────────────────────────────────────────────

    #[test]
    fn execution_time_above_hyperperiod_is_infeasible_without_candidates() {
        let tasks = set(&[(10, 100.0, Some(100.0))]);
        let result = FrameSolver::new(SolverConfig {
            domain_policy: DomainPolicy::Ignore,
            ..SolverConfig::default()
        })
        .solve(&tasks)
        .unwrap();
        assert_eq!(
            result,
            FeasibilityResult::Infeasible {
                hyperperiod: 10,
                candidates_tried: vec![],
            }
        );
        assert!(!result.is_feasible());
        assert_eq!(result.frame_size(), None);
    }

    #[test]
    fn exhausted_candidates_are_listed() {
        // H = 4, e_max = 3 → only f = 4, and 8 - 4 = 4 > 3
        let tasks = set(&[(4, 3.0, Some(3.0))]);
        let result = solve(&tasks).unwrap();
        assert_eq!(
            result,
            FeasibilityResult::Infeasible {
                hyperperiod: 4,
                candidates_tried: vec![4],
            }
        );
    }

    // ── errors ────────────────────────────────────────────────────────────────

    #[test]
    fn enforced_domain_violation_is_an_error() {
        let tasks = set(&[(10, 100.0, Some(100.0))]);
        let solver = FrameSolver::new(SolverConfig {
            domain_policy: DomainPolicy::Enforce,
            ..SolverConfig::default()
        });
        assert!(matches!(
            solver.solve(&tasks),
            Err(SolveError::Validation(ValidationError::DomainViolation { task: 1, .. }))
        ));
    }

    #[test]
    fn hyperperiod_limit_is_an_error() {
        let tasks = set(&[(7, 1.0, None), (11, 1.0, None), (13, 1.0, None)]);
        let solver = FrameSolver::new(SolverConfig {
            hyperperiod_limit: 1_000,
            ..SolverConfig::default()
        });
        assert_eq!(
            solver.solve(&tasks).unwrap_err(),
            SolveError::Hyperperiod(HyperperiodError::TooLarge {
                value: 1_001,
                limit: 1_000
            })
        );
    }

    // ── properties ────────────────────────────────────────────────────────────

    #[test]
    fn result_is_independent_of_task_order() {
        let forward = set(&[(4, 1.0, None), (5, 1.8, None), (20, 1.0, None), (20, 2.0, None)]);
        let backward = set(&[(20, 2.0, None), (20, 1.0, None), (5, 1.8, None), (4, 1.0, None)]);
        assert_eq!(
            solve(&forward).unwrap().frame_size(),
            solve(&backward).unwrap().frame_size()
        );
    }

    #[test]
    fn winner_is_the_largest_passing_divisor() {
        let tasks = set(&[(6, 1.0, None), (8, 2.0, None), (12, 1.0, Some(10.0))]);
        let a = FrameSolver::default().analyse(&tasks).unwrap();
        let f = a.result.frame_size().unwrap();
        for &bigger in a.candidates.iter().filter(|&&c| c > f) {
            assert!(!feasibility::evaluate_candidate(bigger, &tasks).passed);
        }
    }

    #[test]
    fn candidate_filter_does_not_change_feasible_answers() {
        let mut compared = 0;
        for p1 in 2..=12u64 {
            for p2 in 2..=12u64 {
                for e in [0.5, 1.0, 2.0] {
                    let tasks = set(&[(p1, e, None), (p2, 1.0, None)]);
                    let filtered = solve(&tasks).unwrap().frame_size();
                    if filtered.is_some() {
                        assert_eq!(filtered, unfiltered_answer(&tasks), "P=({p1},{p2}) e={e}");
                        compared += 1;
                    }
                }
            }
        }
        assert!(compared > 0);
    }

    #[test]
    fn feasible_result_serializes_with_status_tag() {
        let tasks = set(&[(4, 1.0, None), (5, 2.0, None)]);
        let json = serde_json::to_value(solve(&tasks).unwrap()).unwrap();
        assert_eq!(json["status"], "feasible");
        assert_eq!(json["frame_size"], 2);
        assert_eq!(json["per_task_checks"][1]["lhs"], 3);
    }
}
