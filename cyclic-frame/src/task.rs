/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Task data structures and boundary validation.
//!
//! Two types model the two sides of the input boundary:
//!
//! ```text
//! YAML / --task / prompt ──► TaskRecord ──(TaskSet::from_records)──► TaskSet ──► solver
//!                            ↑ raw, unchecked                        ↑ validated, immutable
//! ```
//!
//! Everything the solver assumes about its input (non-empty set, positive
//! integer periods, positive finite execution times and deadlines) is checked
//! exactly once, here.  Values are never clamped or coerced: a bad record is
//! rejected with a [`ValidationError`] naming the offending task.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

// ── Validation errors ─────────────────────────────────────────────────────────

/// Why a task record (or a whole task set) was rejected.
///
/// Task numbers are 1-based, matching the `T<i>` names used in reports.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The task set has no tasks.
    #[error("task set is empty, at least one task is required")]
    EmptyInput,

    /// The period is zero or negative.
    #[error("task {task}: period {value} is not a positive integer")]
    InvalidPeriod { task: usize, value: i64 },

    /// The execution time is zero, negative or not finite.
    #[error("task {task}: execution time {value} is not a positive number")]
    InvalidExecutionTime { task: usize, value: f64 },

    /// The deadline is zero, negative or not finite.
    #[error("task {task}: deadline {value} is not a positive number")]
    InvalidDeadline { task: usize, value: f64 },

    /// The raw text could not be parsed at all.
    #[error("cannot parse {field} '{input}': {reason}")]
    Malformed {
        field: &'static str,
        input: String,
        reason: String,
    },

    /// The task breaks `execution_time ≤ deadline ≤ period`.
    ///
    /// Only produced under [`DomainPolicy::Enforce`].
    #[error(
        "task {task}: expected execution time {execution_time} ≤ deadline {deadline} ≤ period {period}"
    )]
    DomainViolation {
        task: usize,
        execution_time: f64,
        deadline: f64,
        period: u64,
    },
}

// ── Domain policy ─────────────────────────────────────────────────────────────

/// What to do with tasks that break `execution_time ≤ deadline ≤ period`.
///
/// The frame-size conditions do not need this relation to hold, but a task
/// set that violates it cannot be scheduled in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainPolicy {
    /// Do not check.
    Ignore,
    /// Log a warning per offending task and carry on.
    #[default]
    Warn,
    /// Reject the task set with [`ValidationError::DomainViolation`].
    Enforce,
}

impl FromStr for DomainPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(DomainPolicy::Ignore),
            "warn" => Ok(DomainPolicy::Warn),
            "enforce" => Ok(DomainPolicy::Enforce),
            other => Err(ValidationError::Malformed {
                field: "domain policy",
                input: other.to_string(),
                reason: "expected one of: ignore, warn, enforce".to_string(),
            }),
        }
    }
}

// ── Field parsers ─────────────────────────────────────────────────────────────

/// Parse and validate the period of task number `task`.
pub fn parse_period(task: usize, raw: &str) -> Result<u64, ValidationError> {
    let value: i64 = raw.trim().parse().map_err(|e| ValidationError::Malformed {
        field: "period",
        input: raw.trim().to_string(),
        reason: format!("{e}"),
    })?;
    validate_period(task, value)
}

/// Parse and validate the execution time of task number `task`.
pub fn parse_execution_time(task: usize, raw: &str) -> Result<f64, ValidationError> {
    let value = parse_real("execution time", raw)?;
    validate_execution_time(task, value)
}

/// Parse and validate the deadline of task number `task`.
///
/// A blank string means "deadline equals period" and yields `Ok(None)`.
pub fn parse_deadline(task: usize, raw: &str) -> Result<Option<f64>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let value = parse_real("deadline", raw)?;
    validate_deadline(task, value).map(Some)
}

fn parse_real(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim().parse().map_err(|e| ValidationError::Malformed {
        field,
        input: raw.trim().to_string(),
        reason: format!("{e}"),
    })
}

fn validate_period(task: usize, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value)
        .ok()
        .filter(|&p| p > 0)
        .ok_or(ValidationError::InvalidPeriod { task, value })
}

fn validate_execution_time(task: usize, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidExecutionTime { task, value })
    }
}

fn validate_deadline(task: usize, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::InvalidDeadline { task, value })
    }
}

// ── TaskRecord (raw input) ────────────────────────────────────────────────────

/// One task exactly as the input layer supplied it.
///
/// `period` is signed so that a negative value in a YAML file reaches
/// validation (and gets a precise error) instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskRecord {
    /// Optional display name; defaults to `T<i>`.
    #[serde(default)]
    pub name: Option<String>,

    pub period: i64,

    pub execution_time: f64,

    /// Relative deadline; `None` means "equal to the period".
    #[serde(default)]
    pub deadline: Option<f64>,
}

impl FromStr for TaskRecord {
    type Err = ValidationError;

    /// Parse a compact `P,e[,D]` string such as `4,1` or `5,2,4.5`.
    ///
    /// Only syntax is checked here; positivity is checked by
    /// [`TaskSet::from_records`], which knows the task's position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| ValidationError::Malformed {
            field: "task",
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(malformed("expected PERIOD,EXECUTION_TIME[,DEADLINE]"));
        }

        let period = parts[0]
            .parse::<i64>()
            .map_err(|_| malformed("period must be an integer"))?;
        let execution_time = parse_real("execution time", parts[1])?;
        let deadline = match parts.get(2) {
            Some(d) if !d.is_empty() => Some(parse_real("deadline", d)?),
            _ => None,
        };

        Ok(TaskRecord {
            name: None,
            period,
            execution_time,
            deadline,
        })
    }
}

// ── Task (validated) ──────────────────────────────────────────────────────────

/// A periodic task with a validated period, execution time and deadline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    /// Display name (`T<i>` unless the input named it).
    pub name: String,

    /// Period, a positive integer number of time units.
    pub period: u64,

    /// Worst-case execution time, a positive real.
    pub execution_time: f64,

    /// Relative deadline, a positive real.
    pub deadline: f64,
}

impl Task {
    /// Build a task; `deadline = None` makes the deadline equal the period.
    ///
    /// The name is left empty and filled in by [`TaskSet::new`].
    pub fn new(period: u64, execution_time: f64, deadline: Option<f64>) -> Self {
        Self {
            name: String::new(),
            period,
            execution_time,
            deadline: deadline.unwrap_or(period as f64),
        }
    }

    /// Set the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// `true` if `execution_time ≤ deadline ≤ period`.
    pub fn satisfies_domain(&self) -> bool {
        self.execution_time <= self.deadline && self.deadline <= self.period as f64
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(P={}, e={}, D={})",
            self.name, self.period, self.execution_time, self.deadline
        )
    }
}

// ── TaskSet ───────────────────────────────────────────────────────────────────

/// A non-empty, validated, immutable sequence of tasks.
///
/// Order is kept for reporting only; the solver's answer is the same for any
/// permutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Validate `tasks` and wrap them.
    ///
    /// Unnamed tasks are named `T<i>` after their 1-based position.
    ///
    /// # Errors
    /// [`ValidationError::EmptyInput`] for an empty vector, otherwise the
    /// first invalid field found.
    pub fn new(mut tasks: Vec<Task>) -> Result<Self, ValidationError> {
        if tasks.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        for (i, task) in tasks.iter_mut().enumerate() {
            let index = i + 1;
            if task.period == 0 {
                return Err(ValidationError::InvalidPeriod {
                    task: index,
                    value: 0,
                });
            }
            validate_execution_time(index, task.execution_time)?;
            validate_deadline(index, task.deadline)?;
            if task.name.is_empty() {
                task.name = format!("T{index}");
            }
        }

        Ok(Self { tasks })
    }

    /// Validate raw records from a file, the command line or a prompt.
    pub fn from_records(records: Vec<TaskRecord>) -> Result<Self, ValidationError> {
        let tasks = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let index = i + 1;
                let period = validate_period(index, r.period)?;
                let execution_time = validate_execution_time(index, r.execution_time)?;
                let deadline = r
                    .deadline
                    .map(|d| validate_deadline(index, d))
                    .transpose()?;

                let task = Task::new(period, execution_time, deadline);
                Ok(match r.name {
                    Some(name) if !name.trim().is_empty() => task.named(name.trim()),
                    _ => task,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Self::new(tasks)
    }

    /// The tasks, in input order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always `false` for a constructed set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All periods, in task order.
    pub fn periods(&self) -> Vec<u64> {
        self.tasks.iter().map(|t| t.period).collect()
    }

    /// `max(e_i)`, the lower bound on any frame size.
    pub fn max_execution_time(&self) -> f64 {
        self.tasks
            .iter()
            .map(|t| t.execution_time)
            .fold(0.0, f64::max)
    }

    /// Apply `policy` to the `execution_time ≤ deadline ≤ period` relation.
    ///
    /// # Errors
    /// Under [`DomainPolicy::Enforce`], the first offending task as
    /// [`ValidationError::DomainViolation`].
    pub fn check_domain(&self, policy: DomainPolicy) -> Result<(), ValidationError> {
        if policy == DomainPolicy::Ignore {
            return Ok(());
        }

        for (i, task) in self.tasks.iter().enumerate() {
            if task.satisfies_domain() {
                continue;
            }
            match policy {
                DomainPolicy::Enforce => {
                    return Err(ValidationError::DomainViolation {
                        task: i + 1,
                        execution_time: task.execution_time,
                        deadline: task.deadline,
                        period: task.period,
                    });
                }
                _ => warn!(
                    task = %task,
                    "Task breaks execution_time <= deadline <= period"
                ),
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TaskSet {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
