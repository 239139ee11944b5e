/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Rendering of [`Analysis`] results.
//!
//! The solver never prints.  It hands back an [`Analysis`] and this module
//! turns it into text (through a [`Messages`] catalog) or JSON, so the same
//! result can go to a console, a file or a log without being recomputed.

pub mod messages;

pub use messages::{English, Locale, Messages, Russian};

use std::fmt;
use std::str::FromStr;

use crate::frame::{Analysis, FeasibilityResult};

/// How `solve` output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Step-by-step derivation in the chosen language.
    #[default]
    Text,
    /// The whole [`Analysis`] as pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unsupported format '{other}' (expected: text, json)")),
        }
    }
}

/// Text rendering of an [`Analysis`]: header, hyperperiod, candidate list,
/// one block per candidate tried, verdict.
///
/// ```text
/// === Finding the Largest Frame Size ===
///
/// Hyperperiod H = 20
/// Minimum feasible frame size f ≥ max(e_i) = 2
///
/// Divisors of hyperperiod satisfying f ≥ max(e_i), in descending order: [20, 10, 5, 4, 2]
///
/// ### Checking f = 20 ###
/// T1: 2 * 20 - gcd(4,20) = 36 > D1(4) ✗
/// ...
/// ✓ Largest feasible frame size guaranteeing timely completion is f = 2
/// ```
pub struct TextReport<'a> {
    analysis: &'a Analysis,
    messages: &'a dyn Messages,
}

impl<'a> TextReport<'a> {
    pub fn new(analysis: &'a Analysis, messages: &'a dyn Messages) -> Self {
        Self { analysis, messages }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.messages;
        let a = self.analysis;

        writeln!(f, "{}", m.search_header())?;
        writeln!(f)?;
        writeln!(f, "{}", m.hyperperiod(a.hyperperiod.hyperperiod))?;
        writeln!(f, "{}", m.min_frame_size(a.max_execution_time))?;
        writeln!(f)?;
        writeln!(f, "{}", m.candidates(&a.candidates))?;
        writeln!(f)?;

        for trial in &a.trials {
            writeln!(f, "{}", m.checking(trial.frame_size))?;
            for check in &trial.checks {
                writeln!(f, "{}", m.task_check(check))?;
            }
            writeln!(f)?;
        }

        match &a.result {
            FeasibilityResult::Feasible { frame_size, .. } => {
                writeln!(f, "{}", m.feasible(*frame_size))
            }
            FeasibilityResult::Infeasible { .. } => writeln!(f, "{}", m.infeasible()),
        }
    }
}

/// Render `analysis` as text in the given catalog.
pub fn render_text(analysis: &Analysis, messages: &dyn Messages) -> String {
    TextReport::new(analysis, messages).to_string()
}

/// Render `analysis` as pretty-printed JSON.
pub fn render_json(analysis: &Analysis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(analysis)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
