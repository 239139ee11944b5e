/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Interactive task-set entry.
//!
//! Asks for the number of tasks, then for each task its period, execution
//! time and (optionally) deadline.  An invalid entry prints the catalog's
//! error line and asks for the same field again; running out of input is an
//! error.  Field parsing is delegated to the validators in [`crate::task`], so
//! the prompt accepts exactly what a workload file accepts.
//!
//! Generic over `BufRead` / `Write` so tests can drive it with in-memory
//! buffers.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::report::Messages;
use crate::task::{parse_deadline, parse_execution_time, parse_period, Task, TaskSet};

/// Run the interactive dialogue and return the validated task set.
pub fn collect_task_set<R, W>(mut input: R, output: &mut W, messages: &dyn Messages) -> Result<TaskSet>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", messages.title())?;

    let count = ask(&mut input, output, &messages.task_count_prompt(), |raw| {
        raw.trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| messages.task_count_error())
    })?;

    let mut tasks = Vec::new();
    for i in 1..=count {
        let period = ask(&mut input, output, &messages.period_prompt(i), |raw| {
            parse_period(i, raw).map_err(|e| {
                debug!(task = i, error = %e, "Rejected period");
                messages.period_error()
            })
        })?;

        let execution_time = ask(&mut input, output, &messages.execution_time_prompt(i), |raw| {
            parse_execution_time(i, raw).map_err(|e| {
                debug!(task = i, error = %e, "Rejected execution time");
                messages.execution_time_error()
            })
        })?;

        let deadline = ask(&mut input, output, &messages.deadline_prompt(i), |raw| {
            parse_deadline(i, raw).map_err(|e| {
                debug!(task = i, error = %e, "Rejected deadline");
                messages.deadline_error()
            })
        })?;

        tasks.push(Task::new(period, execution_time, deadline));
    }

    Ok(TaskSet::new(tasks)?)
}

/// Prompt until `parse` accepts a line.  `parse` returns the error text to
/// show on rejection.
fn ask<R, W, T, F>(input: &mut R, output: &mut W, prompt: &str, mut parse: F) -> Result<T>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> std::result::Result<T, String>,
{
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            bail!("input ended while waiting for: {}", prompt.trim_end());
        }

        match parse(line.trim_end_matches(['\r', '\n'])) {
            Ok(value) => return Ok(value),
            Err(message) => writeln!(output, "{message}")?,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
