/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Deadline-rounding check for frame-size candidates.
//!
//! # Theory
//! In a cyclic schedule a job of task `i` may be released anywhere inside a
//! frame and only gets processor time from the next frame boundary on.  For the
//! job to complete before its deadline there must be one full frame between
//! its release and its deadline.  The worst-case gap between a release and the
//! next frame start is `f − gcd(P_i, f)`, which gives the third necessary
//! condition:
//!
//! $$2f - \gcd(P_i, f) \leq D_i$$
//!
//! A candidate `f` is accepted only if the inequality holds for every task.
//!
//! | Task | P | D | f = 4 | f = 2 |
//! |---|---|---|---|---|
//! | T1 | 4 | 4 | 8 − 4 = 4 ✓ | 4 − 2 = 2 ✓ |
//! | T2 | 5 | 5 | 8 − 1 = 7 ✗ | 4 − 1 = 3 ✓ |

use serde::Serialize;
use tracing::debug;

use crate::hyperperiod::math::gcd;
use crate::task::{Task, TaskSet};

// ── Result types ──────────────────────────────────────────────────────────────

/// Outcome of the deadline check for one task and one frame size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCheck {
    /// 1-based position of the task in its set.
    pub task_index: usize,
    /// Task display name.
    pub task: String,
    pub period: u64,
    pub frame_size: u64,
    /// `gcd(period, frame_size)`.
    pub gcd: u64,
    /// `2 * frame_size - gcd`.
    pub lhs: u64,
    pub deadline: f64,
    /// `lhs ≤ deadline`.
    pub passed: bool,
}

/// All checks performed for one candidate frame size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTrial {
    pub frame_size: u64,
    /// Checks in task order.  Stops at the first failing task.
    pub checks: Vec<TaskCheck>,
    /// `true` if every task passed.
    pub passed: bool,
}

impl CandidateTrial {
    /// The check that disqualified this candidate, if any.
    pub fn failing_check(&self) -> Option<&TaskCheck> {
        self.checks.iter().find(|c| !c.passed)
    }
}

/// Every trial performed by [`search`], in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Search {
    pub trials: Vec<CandidateTrial>,
}

impl Search {
    /// The passing trial, which is always the last one when present.
    pub fn winner(&self) -> Option<&CandidateTrial> {
        self.trials.last().filter(|t| t.passed)
    }

    /// Frame sizes in the order they were tried.
    pub fn tried(&self) -> Vec<u64> {
        self.trials.iter().map(|t| t.frame_size).collect()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Evaluate `2f − gcd(P, f) ≤ D` for one task.
///
/// `task_index` is the 1-based position used in reports.
pub fn check_task(task_index: usize, task: &Task, frame_size: u64) -> TaskCheck {
    let g = gcd(task.period, frame_size);
    // g ≤ f, so the subtraction cannot underflow; 2f saturates instead of
    // wrapping for frame sizes near u64::MAX.
    let lhs = frame_size.saturating_mul(2) - g;

    TaskCheck {
        task_index,
        task: task.name.clone(),
        period: task.period,
        frame_size,
        gcd: g,
        lhs,
        deadline: task.deadline,
        passed: lhs as f64 <= task.deadline,
    }
}

/// Check one candidate against every task, stopping at the first failure.
pub fn evaluate_candidate(frame_size: u64, tasks: &TaskSet) -> CandidateTrial {
    let mut checks = Vec::with_capacity(tasks.len());
    let mut passed = true;

    for (i, task) in tasks.iter().enumerate() {
        let check = check_task(i + 1, task, frame_size);
        let ok = check.passed;
        checks.push(check);
        if !ok {
            passed = false;
            break;
        }
    }

    CandidateTrial {
        frame_size,
        checks,
        passed,
    }
}

/// Scan `candidates` in the given order and stop at the first one every task
/// accepts.
///
/// With candidates sorted descending the first passing candidate is the
/// largest feasible frame size.
pub fn search(candidates: &[u64], tasks: &TaskSet) -> Search {
    let mut trials = Vec::new();

    for &f in candidates {
        let trial = evaluate_candidate(f, tasks);
        match trial.failing_check() {
            Some(fail) => debug!(
                frame_size = f,
                task = %fail.task,
                lhs = fail.lhs,
                deadline = fail.deadline,
                "Candidate rejected"
            ),
            None => debug!(frame_size = f, "Candidate accepted"),
        }

        let done = trial.passed;
        trials.push(trial);
        if done {
            break;
        }
    }

    Search { trials }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
