/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Workload file loading and solver settings.
//!
//! The expected YAML structure is:
//! ```yaml
//! solver:                      # optional
//!   hyperperiod_limit: 1000000000000
//!   domain_policy: warn        # ignore | warn | enforce
//! tasks:
//!   - name: sensor             # optional, defaults to T<i>
//!     period: 4
//!     execution_time: 1
//!     deadline: 4              # optional, defaults to the period
//!   - period: 5
//!     execution_time: 2
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::hyperperiod::DEFAULT_HYPERPERIOD_LIMIT;
use crate::task::{DomainPolicy, TaskRecord, TaskSet};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// This is kept private; callers work with [`Workload`] / [`SolverConfig`].
#[derive(Debug, Deserialize)]
struct WorkloadFile {
    #[serde(default)]
    solver: SolverEntry,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
}

/// Solver fields as they appear in the YAML file.  All optional.
#[derive(Debug, Default, Deserialize)]
struct SolverEntry {
    hyperperiod_limit: Option<u64>,
    domain_policy: Option<DomainPolicy>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Tunables for [`FrameSolver`](crate::frame::FrameSolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Largest hyperperiod the solver accepts.
    pub hyperperiod_limit: u64,
    /// Treatment of tasks that break `execution_time ≤ deadline ≤ period`.
    pub domain_policy: DomainPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            hyperperiod_limit: DEFAULT_HYPERPERIOD_LIMIT,
            domain_policy: DomainPolicy::default(),
        }
    }
}

/// A validated task set together with the solver settings that came with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub solver: SolverConfig,
    pub tasks: TaskSet,
}

impl Workload {
    /// Parse and validate the workload file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, or the task records fail validation.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading workload from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open workload file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid workload file: {}", path.display()))
    }

    /// Parse and validate a workload from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: WorkloadFile =
            serde_yaml::from_str(content).context("Failed to parse workload YAML")?;

        let mut solver = SolverConfig::default();
        if let Some(limit) = file.solver.hyperperiod_limit {
            if limit == 0 {
                bail!("solver.hyperperiod_limit must be positive");
            }
            solver.hyperperiod_limit = limit;
        }
        if let Some(policy) = file.solver.domain_policy {
            solver.domain_policy = policy;
        }

        for (i, r) in file.tasks.iter().enumerate() {
            debug!(
                "  Task {}: P={} e={} D={:?}",
                r.name.clone().unwrap_or_else(|| format!("T{}", i + 1)),
                r.period,
                r.execution_time,
                r.deadline,
            );
        }

        let tasks = TaskSet::from_records(file.tasks)?;

        info!(
            task_count = tasks.len(),
            hyperperiod_limit = solver.hyperperiod_limit,
            domain_policy = ?solver.domain_policy,
            "Workload loaded"
        );

        Ok(Self { solver, tasks })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn default_solver_config() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.hyperperiod_limit, DEFAULT_HYPERPERIOD_LIMIT);
        assert_eq!(cfg.domain_policy, DomainPolicy::Warn);
    }

    #[test]
    fn load_full_workload() {
        let yaml = r#"
solver:
  hyperperiod_limit: 5000
  domain_policy: enforce
tasks:
  - name: sensor
    period: 4
    execution_time: 1
    deadline: 4
  - period: 5
    execution_time: 2.0
"#;
        let f = yaml_tempfile(yaml);
        let w = Workload::load_from_file(f.path()).unwrap();

        assert_eq!(w.solver.hyperperiod_limit, 5000);
        assert_eq!(w.solver.domain_policy, DomainPolicy::Enforce);
        assert_eq!(w.tasks.len(), 2);

        let t1 = &w.tasks.tasks()[0];
        assert_eq!(t1.name, "sensor");
        assert_eq!(t1.period, 4);
        assert_eq!(t1.deadline, 4.0);

        let t2 = &w.tasks.tasks()[1];
        assert_eq!(t2.name, "T2");
        assert_eq!(t2.execution_time, 2.0);
        assert_eq!(t2.deadline, 5.0); // defaulted to the period
    }

    #[test]
    fn solver_section_is_optional() {
        let w = Workload::from_yaml_str("tasks:\n  - period: 10\n    execution_time: 3\n")
            .unwrap();
        assert_eq!(w.solver, SolverConfig::default());
        assert_eq!(w.tasks.len(), 1);
    }

    #[test]
    fn missing_tasks_is_empty_input() {
        let err = Workload::from_yaml_str("solver:\n  domain_policy: warn\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyInput)
        );
    }

    #[test]
    fn negative_period_is_reported_with_task_number() {
        let yaml = "tasks:\n  - period: 4\n    execution_time: 1\n  - period: -5\n    execution_time: 1\n";
        let err = Workload::from_yaml_str(yaml).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidPeriod { task: 2, value: -5 })
        );
    }

    #[test]
    fn unknown_domain_policy_is_rejected() {
        let yaml = "solver:\n  domain_policy: strict\ntasks:\n  - period: 4\n    execution_time: 1\n";
        assert!(Workload::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn zero_hyperperiod_limit_is_rejected() {
        let yaml = "solver:\n  hyperperiod_limit: 0\ntasks:\n  - period: 4\n    execution_time: 1\n";
        assert!(Workload::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = Workload::load_from_file(Path::new("/nonexistent/path/workload.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(Workload::load_from_file(f.path()).is_err());
    }
}
