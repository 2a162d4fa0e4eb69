//! A processor simulation library
//!
//! This drives the policies from the [`scheduler`] crate: it loads
//! workloads, records what the CPU did after every slot and formats the
//! results.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::fs;
use std::path::Path;
use std::thread;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;

use scheduler::{
    ExecutionSlot, Observer, Pid, Process, ProcessDescriptor, ProcessRecord, ProcessState,
    Schedule, ScheduleError, Scheduler, Time,
};

/// Snapshot taken after a slot was appended to the timeline or extended.
#[derive(Debug)]
pub struct Log {
    /// The slot, as it was after the change.
    pub slot: ExecutionSlot,

    /// The processes and their states at that point.
    pub processes: HashMap<Pid, ProcessInfo>,
}

impl Log {
    fn new(slot: ExecutionSlot, processes: HashMap<Pid, ProcessInfo>) -> Log {
        Log { slot, processes }
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Run {}", self.slot)?;
        writeln!(f, "PID\tSTATE\t\tPRI\tARRIVE\tBURST\tDONE\tTAT\tWAIT\tEXTRA")?;
        let mut pids = self.processes.keys().collect::<Vec<&Pid>>();
        pids.sort();
        for pid in pids.into_iter() {
            if let Some(process) = self.processes.get(pid) {
                writeln!(f, "{}", process)?;
            }
        }
        writeln!(f)
    }
}

impl PartialEq<Log> for Log {
    fn eq(&self, other: &Log) -> bool {
        self.slot == other.slot && self.processes == other.processes
    }
}

/// Information about a process state.
#[derive(Debug, PartialEq)]
pub struct ProcessInfo {
    /// The PID of the process.
    pub pid: Pid,

    /// The process state.
    pub state: ProcessState,

    /// The process priority
    pub priority: i32,

    pub arrival: Time,
    pub burst: Time,

    /// The process timings (completion, turnaround, waiting).
    pub timings: (Time, Time, Time),

    /// Extra details about the process
    pub extra: String,
}

impl ProcessInfo {
    fn of(process: &dyn Process) -> ProcessInfo {
        ProcessInfo {
            pid: process.pid(),
            state: process.state(),
            priority: process.priority(),
            arrival: process.arrival(),
            burst: process.burst(),
            timings: process.timings(),
            extra: process.extra(),
        }
    }
}

impl Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.pid,
            self.state,
            self.priority,
            self.arrival,
            self.burst,
            self.timings.0,
            self.timings.1,
            self.timings.2,
            self.extra
        )
    }
}

/// The processor simulator.
///
/// It observes a policy while it runs and keeps a [`Log`] for every
/// change of the timeline.
#[derive(Default)]
pub struct Processor {
    logs: Vec<Log>,
}

impl Observer for Processor {
    fn slot_recorded(&mut self, slot: &ExecutionSlot, processes: &[ProcessRecord]) {
        let snapshot = processes
            .iter()
            .map(|process| (process.pid(), ProcessInfo::of(process)))
            .collect();
        let log = Log::new(*slot, snapshot);
        #[cfg(feature = "output")]
        println!("{}", log);
        self.logs.push(log);
    }

    fn completed(&mut self, process: &ProcessRecord) {
        debug!("P{} done at {}", process.pid(), process.completion());
    }
}

impl Processor {
    /// Runs `scheduler` over the processes and returns the schedule with the
    /// logs recorded along the way.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::ProcessDescriptor;
    ///
    /// let processes = vec![
    ///     ProcessDescriptor::new(1, 0, 0, 5),
    ///     ProcessDescriptor::new(2, 0, 2, 3),
    /// ];
    /// let (schedule, logs) = Processor::run(&scheduler::fcfs(), &processes).unwrap();
    /// assert_eq!(logs.len(), schedule.timeline.len());
    /// ```
    pub fn run(
        scheduler: &dyn Scheduler,
        processes: &[ProcessDescriptor],
    ) -> Result<(Schedule, Vec<Log>), ScheduleError> {
        let mut processor = Processor::default();
        info!("Running {} over {} processes", scheduler.name(), processes.len());
        let schedule = scheduler.run_with(processes, &mut processor)?;
        Ok((schedule, processor.logs))
    }

    /// Runs every scheduler on its own thread, each over its own copy of
    /// the processes. Results keep the order of `schedulers`.
    pub fn compare(
        schedulers: &[Box<dyn Scheduler>],
        processes: &[ProcessDescriptor],
    ) -> Vec<(&'static str, Result<Schedule, ScheduleError>)> {
        thread::scope(|s| {
            let handles: Vec<_> = schedulers
                .iter()
                .map(|scheduler| {
                    let input = processes.to_vec();
                    s.spawn(move || (scheduler.name(), scheduler.run(&input)))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    }
}

/// Format the [`Processor`]'s logs to a [`String`].
///
/// * `logs` - the logs returned by [`Processor::run`].
pub fn format_logs(logs: &[Log]) -> String {
    let mut s = String::new();
    for (iteration, log) in logs.iter().enumerate() {
        // Writing to a String never fails.
        let _ = fmt::write(
            &mut s,
            format_args!("===== Iteration: {} =====\n{}\n", iteration + 1, log),
        );
    }
    s
}

/// Format a [`Schedule`] as a results table followed by the averages.
pub fn format_schedule(schedule: &Schedule) -> String {
    let mut s = String::new();
    let _ = write_schedule(&mut s, schedule);
    s
}

fn write_schedule(s: &mut String, schedule: &Schedule) -> fmt::Result {
    use std::fmt::Write;

    writeln!(s, "===== {} =====", schedule.policy)?;
    writeln!(s, "PID\tNAME\tPRI\tARRIVE\tBURST\tDONE\tTAT\tWAIT")?;
    for process in &schedule.processes {
        let (completion, turnaround, waiting) = process.timings();
        writeln!(
            s,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            process.pid(),
            process.name(),
            process.priority(),
            process.arrival(),
            process.burst(),
            completion,
            turnaround,
            waiting
        )?;
    }
    writeln!(s, "Timeline: {}", schedule.timeline)?;
    let order: Vec<String> = schedule.order.iter().map(|pid| format!("P{pid}")).collect();
    writeln!(s, "Execution order: {}", order.join(" "))?;
    writeln!(s, "Makespan: {}", schedule.makespan())?;
    writeln!(s, "AWT: {:.2}", schedule.statistics.average_waiting_time)?;
    writeln!(s, "ATAT: {:.2}", schedule.statistics.average_turnaround_time)
}

/// Format the event log of a [`Schedule`], one event per line.
pub fn format_events(schedule: &Schedule) -> String {
    schedule
        .events
        .iter()
        .map(|event| format!("{event}\n"))
        .collect()
}

/// A set of processes to simulate, as read from a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Workload {
    /// Overhead used by the priority policy, if the file sets one.
    #[serde(default)]
    pub context_switch: Option<Time>,
    pub processes: Vec<ProcessDescriptor>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WorkloadFile {
    List(Vec<ProcessDescriptor>),
    Full(Workload),
}

/// Parses a workload from JSON: either a bare list of processes or an
/// object with `processes` and an optional `context_switch`.
pub fn parse_workload(json: &str) -> serde_json::Result<Workload> {
    let workload = match serde_json::from_str(json)? {
        WorkloadFile::List(processes) => Workload {
            context_switch: None,
            processes,
        },
        WorkloadFile::Full(workload) => workload,
    };
    Ok(workload)
}

/// Reads a workload file, see [`parse_workload`].
pub fn load_workload(path: &Path) -> Result<Workload> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let workload = parse_workload(&json)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("Loaded {} processes from {}", workload.processes.len(), path.display());
    Ok(workload)
}
