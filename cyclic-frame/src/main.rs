/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use cyclic_frame::config::{SolverConfig, Workload};
use cyclic_frame::frame::FrameSolver;
use cyclic_frame::hyperperiod::math::{divisors, gcd, lcm_of_slice};
use cyclic_frame::prompt;
use cyclic_frame::report::{render_json, Locale, Messages, OutputFormat, TextReport};
use cyclic_frame::task::{DomainPolicy, TaskRecord, TaskSet};

/// Process exit status when the task set has no feasible frame size.
const EXIT_INFEASIBLE: i32 = 2;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Largest feasible frame size for a cyclic (frame-based) scheduler.
///
/// Example:
///   cyclic-frame solve -t 4,1,4 -t 5,2,5
///   cyclic-frame --lang ru solve --file workload.yaml
#[derive(Debug, Parser)]
#[command(
    name = "cyclic-frame",
    about = "Largest feasible frame size for cyclic real-time schedulers",
    long_about = None,
)]
struct Cli {
    /// Language of reports and prompts (en, ru).
    #[arg(short = 'l', long = "lang", default_value = "en", global = true)]
    lang: Locale,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find the largest frame size that lets every task meet its deadline.
    Solve(SolveArgs),

    /// Least common multiple of positive integers.
    Lcm {
        #[arg(required = true, value_parser = clap::value_parser!(u64).range(1..))]
        numbers: Vec<u64>,
    },

    /// Greatest common divisor of two integers.
    Gcd { a: u64, b: u64 },

    /// All divisors of a positive integer, ascending.
    Divisors {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        n: u64,
    },
}

#[derive(Debug, Args)]
struct SolveArgs {
    /// YAML workload file (tasks plus optional solver settings).
    #[arg(short = 'f', long = "file", conflicts_with_all = ["tasks", "interactive"])]
    file: Option<PathBuf>,

    /// Task as PERIOD,EXECUTION_TIME[,DEADLINE]; repeat for each task.
    #[arg(short = 't', long = "task", value_name = "P,e[,D]")]
    tasks: Vec<TaskRecord>,

    /// Enter the task set interactively.
    #[arg(short = 'i', long = "interactive", conflicts_with = "tasks")]
    interactive: bool,

    /// Output format (text, json).
    #[arg(long = "format", default_value = "text")]
    format: OutputFormat,

    /// Reject task sets whose hyperperiod exceeds this value.
    #[arg(long = "hyperperiod-limit", value_parser = clap::value_parser!(u64).range(1..))]
    hyperperiod_limit: Option<u64>,

    /// Handling of tasks that break e <= D <= P (ignore, warn, enforce).
    #[arg(long = "domain-policy")]
    domain_policy: Option<DomainPolicy>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// Returns the process exit status: `0` feasible, [`EXIT_INFEASIBLE`]
/// otherwise.
fn run_solve(args: SolveArgs, messages: &dyn Messages) -> Result<i32> {
    let (mut config, tasks) = if let Some(path) = &args.file {
        let workload = Workload::load_from_file(path)?;
        (workload.solver, workload.tasks)
    } else if args.interactive {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let tasks = prompt::collect_task_set(stdin.lock(), &mut stdout, messages)?;
        (SolverConfig::default(), tasks)
    } else if !args.tasks.is_empty() {
        (SolverConfig::default(), TaskSet::from_records(args.tasks)?)
    } else {
        bail!("no task source given: use --file, --task or --interactive");
    };

    // command-line flags override the workload file
    if let Some(limit) = args.hyperperiod_limit {
        config.hyperperiod_limit = limit;
    }
    if let Some(policy) = args.domain_policy {
        config.domain_policy = policy;
    }

    info!(
        task_count = tasks.len(),
        hyperperiod_limit = config.hyperperiod_limit,
        domain_policy = ?config.domain_policy,
        "Solving"
    );

    let analysis = FrameSolver::new(config).analyse(&tasks)?;

    match args.format {
        OutputFormat::Text => print!("{}", TextReport::new(&analysis, messages)),
        OutputFormat::Json => println!("{}", render_json(&analysis)?),
    }

    Ok(if analysis.result.is_feasible() {
        0
    } else {
        EXIT_INFEASIBLE
    })
}

fn run(cli: Cli) -> Result<i32> {
    let messages = cli.lang.messages();

    match cli.command {
        Command::Solve(args) => run_solve(args, messages),
        Command::Lcm { numbers } => {
            let value = lcm_of_slice(&numbers)?;
            println!("{}", messages.lcm_result(&numbers, value));
            Ok(0)
        }
        Command::Gcd { a, b } => {
            println!("{}", messages.gcd_result(a, b, gcd(a, b)));
            Ok(0)
        }
        Command::Divisors { n } => {
            println!("{}", messages.divisors_result(&divisors(n)));
            Ok(0)
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging on stderr so reports on stdout stay clean.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}
