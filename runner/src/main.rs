use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use processor::{format_events, format_logs, format_schedule, load_workload, Processor, Workload};
use scheduler::{Policy, ProcessDescriptor, Scheduler, Time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Fcfs,
    Priority,
    AgingSrtf,
    Fcai,
    /// Run every policy on the same workload.
    All,
}

impl PolicyArg {
    fn policies(self) -> Vec<Policy> {
        match self {
            PolicyArg::Fcfs => vec![Policy::Fcfs],
            PolicyArg::Priority => vec![Policy::Priority],
            PolicyArg::AgingSrtf => vec![Policy::AgingSrtf],
            PolicyArg::Fcai => vec![Policy::Fcai],
            PolicyArg::All => Policy::ALL.to_vec(),
        }
    }
}

/// Simulate CPU scheduling policies over a set of processes.
#[derive(Debug, Parser)]
struct Opts {
    /// Scheduling policy to simulate.
    #[clap(short = 'p', long, value_enum, default_value = "fcai")]
    policy: PolicyArg,

    /// Context switch overhead charged by the priority policy. Overrides the
    /// value of the workload file.
    #[clap(short = 'c', long, env = "CONTEXT_SWITCH")]
    context_switch: Option<Time>,

    /// JSON workload: a list of processes, or an object with `processes`
    /// and `context_switch`. A built-in demo workload is used if missing.
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// Print a snapshot of every process after each timeline change.
    #[clap(short = 't', long, action = clap::ArgAction::SetTrue, default_value = "false")]
    trace: bool,

    /// Print the event log of every run.
    #[clap(short = 'e', long, action = clap::ArgAction::SetTrue, default_value = "false")]
    events: bool,

    /// Enable verbose output.
    /// Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// The workload used when no file is given.
fn demo_workload() -> Workload {
    Workload {
        context_switch: Some(1),
        processes: vec![
            ProcessDescriptor::new(1, 4, 0, 17).with_quantum(4),
            ProcessDescriptor::new(2, 9, 3, 6).with_quantum(3),
            ProcessDescriptor::new(3, 3, 4, 10).with_quantum(5),
            ProcessDescriptor::new(4, 8, 29, 4).with_quantum(2),
        ],
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let workload = match &opts.file {
        Some(path) => load_workload(path)?,
        None => {
            info!("No workload file, using the demo workload");
            demo_workload()
        }
    };
    let context_switch = opts
        .context_switch
        .or(workload.context_switch)
        .unwrap_or(0);

    let policies = opts.policy.policies();
    if policies.len() == 1 {
        let scheduler = policies[0].build(context_switch);
        let (schedule, logs) = Processor::run(scheduler.as_ref(), &workload.processes)
            .with_context(|| format!("{} failed", scheduler.name()))?;
        if opts.trace {
            print!("{}", format_logs(&logs));
        }
        if opts.events {
            print!("{}", format_events(&schedule));
        }
        print!("{}", format_schedule(&schedule));
        return Ok(());
    }

    let schedulers: Vec<Box<dyn Scheduler>> = policies
        .iter()
        .map(|policy| policy.build(context_switch))
        .collect();
    let mut failed = 0;
    for (name, result) in Processor::compare(&schedulers, &workload.processes) {
        match result {
            Ok(schedule) => {
                if opts.events {
                    print!("{}", format_events(&schedule));
                }
                println!("{}", format_schedule(&schedule));
            }
            Err(e) => {
                warn!("{name} failed: {e}");
                failed += 1;
            }
        }
    }
    if failed == schedulers.len() {
        anyhow::bail!("every policy rejected the workload");
    }

    Ok(())
}

// Do not delete this line
#[cfg(test)]
mod tests;
