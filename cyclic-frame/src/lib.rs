/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! cyclic-frame – largest feasible frame size for cyclic real-time schedulers
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task          – Task / TaskSet, input records and validation
//! ├── hyperperiod/  – GCD, LCM, divisors; hyperperiod calculator
//! ├── frame/        – candidate generation, deadline check, FrameSolver
//! ├── config/       – YAML workload files and solver settings
//! ├── prompt        – interactive task entry
//! └── report/       – localized text and JSON rendering
//! ```

pub mod config;
pub mod frame;
pub mod hyperperiod;
pub mod prompt;
pub mod report;
pub mod task;

pub use frame::{solve, Analysis, FeasibilityResult, FrameSolver, SolveError};
pub use task::{Task, TaskSet, ValidationError};
