use serde::Serialize;

use crate::event::Event;
use crate::process::ProcessRecord;
use crate::scheduler::{Pid, Process, Time};
use crate::timeline::Timeline;

/// Aggregate statistics of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

impl Statistics {
    /// Arithmetic means over all processes.
    ///
    /// Negative waiting times count as 0 here. The per-process values
    /// are left as computed.
    pub fn from_processes(processes: &[ProcessRecord]) -> Self {
        if processes.is_empty() {
            return Statistics {
                average_waiting_time: 0.0,
                average_turnaround_time: 0.0,
            };
        }

        let count = processes.len() as f64;
        let waiting: Time = processes.iter().map(|process| process.waiting().max(0)).sum();
        let turnaround: Time = processes.iter().map(|process| process.turnaround()).sum();

        Statistics {
            average_waiting_time: waiting as f64 / count,
            average_turnaround_time: turnaround as f64 / count,
        }
    }
}

/// Final timings of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub completion: Time,
    pub turnaround: Time,
    pub waiting: Time,
}

/// The result of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    /// Name of the policy that produced it.
    pub policy: &'static str,
    pub timeline: Timeline,
    /// Final records, in input order.
    pub processes: Vec<ProcessRecord>,
    pub events: Vec<Event>,
    /// PIDs in the order they were dispatched.
    pub order: Vec<Pid>,
    pub statistics: Statistics,
}

impl Schedule {
    pub fn process(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|process| process.pid() == pid)
    }

    pub fn metrics(&self) -> Vec<ProcessMetrics> {
        self.processes
            .iter()
            .map(|process| {
                let (completion, turnaround, waiting) = process.timings();
                ProcessMetrics {
                    pid: process.pid(),
                    completion,
                    turnaround,
                    waiting,
                }
            })
            .collect()
    }

    /// Time at which the last process completed.
    pub fn makespan(&self) -> Time {
        self.processes
            .iter()
            .map(|process| process.completion())
            .max()
            .unwrap_or(0)
    }
}
