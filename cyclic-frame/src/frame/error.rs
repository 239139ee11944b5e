/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the frame solver.
//!
//! An infeasible task set is **not** an error: it is returned as
//! [`FeasibilityResult::Infeasible`](super::FeasibilityResult::Infeasible)
//! inside `Ok`.  [`SolveError`] is reserved for inputs on which the question
//! cannot be answered at all.
//!
//! **Do not** replace these with `anyhow::Error` in library paths; callers
//! match on the variants.

use thiserror::Error;

use crate::hyperperiod::HyperperiodError;
use crate::task::ValidationError;

/// Top-level error type returned by
/// [`FrameSolver::solve()`](super::FrameSolver::solve) and
/// [`FrameSolver::analyse()`](super::FrameSolver::analyse).
///
/// | Variant | Typical cause |
/// |---|---|
/// | `Hyperperiod(EmptyInput)` | no periods reached the calculator |
/// | `Hyperperiod(InvalidPeriod)` | a zero period slipped past the input layer |
/// | `Hyperperiod(Overflow / TooLarge)` | pairwise-coprime periods blow up the LCM |
/// | `Validation(DomainViolation)` | `DomainPolicy::Enforce` and `e ≤ D ≤ P` broken |
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The hyperperiod could not be computed.
    #[error("cannot compute hyperperiod: {0}")]
    Hyperperiod(#[from] HyperperiodError),

    /// The task set was rejected before the search started.
    #[error("invalid task set: {0}")]
    Validation(#[from] ValidationError),
}
