//! Structured record of what a policy did during a run.
//!
//! Every scheduling action is an [`Event`] stamped with the simulated time
//! at which it happened. Collaborators render the log however they like.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::scheduler::{Pid, Time};

/// A single event produced by a policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub time: Time,
    pub kind: EventKind,
}

/// The kind of scheduling event recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventKind {
    /// The process entered a ready structure.
    Admitted { pid: Pid },
    /// The process was given the CPU.
    Dispatched { pid: Pid },
    /// Switch overhead was charged before dispatching the process.
    ContextSwitch { pid: Pid, overhead: Time },
    /// Aging lowered the remaining time of a waiting process.
    Aged { pid: Pid, remaining: Time },
    /// The running process gave up the CPU to another one.
    Preempted { pid: Pid, by: Pid },
    /// The process used its whole slice and goes back to the queue.
    SliceExhausted { pid: Pid },
    QuantumUpdated { pid: Pid, quantum: Time },
    FactorUpdated { pid: Pid, factor: f64 },
    /// The process finished its burst.
    Completed { pid: Pid, turnaround: Time, waiting: Time },
    /// Nothing was ready, the clock jumped to the next arrival.
    Idle { until: Time },
}

impl EventKind {
    /// The process the event is about, if any.
    pub fn pid(&self) -> Option<Pid> {
        match self {
            EventKind::Admitted { pid }
            | EventKind::Dispatched { pid }
            | EventKind::ContextSwitch { pid, .. }
            | EventKind::Aged { pid, .. }
            | EventKind::Preempted { pid, .. }
            | EventKind::SliceExhausted { pid }
            | EventKind::QuantumUpdated { pid, .. }
            | EventKind::FactorUpdated { pid, .. }
            | EventKind::Completed { pid, .. } => Some(*pid),
            EventKind::Idle { .. } => None,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Admitted { pid } => write!(f, "P{pid} added to ready queue"),
            EventKind::Dispatched { pid } => write!(f, "P{pid} started execution"),
            EventKind::ContextSwitch { pid, overhead } => {
                write!(f, "context switch ({overhead}) to P{pid}")
            }
            EventKind::Aged { pid, remaining } => {
                write!(f, "aging applied to P{pid}, remaining {remaining}")
            }
            EventKind::Preempted { pid, by } => write!(f, "P{pid} preempted by P{by}"),
            EventKind::SliceExhausted { pid } => {
                write!(f, "P{pid} finished its quantum, back to the queue")
            }
            EventKind::QuantumUpdated { pid, quantum } => {
                write!(f, "P{pid} quantum updated to {quantum}")
            }
            EventKind::FactorUpdated { pid, factor } => {
                write!(f, "P{pid} FCAI factor updated to {factor}")
            }
            EventKind::Completed {
                pid,
                turnaround,
                waiting,
            } => write!(
                f,
                "P{pid} completed (turnaround {turnaround}, waiting {waiting})"
            ),
            EventKind::Idle { until } => write!(f, "CPU idle until {until}"),
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>4}] {}", self.time, self.kind)
    }
}
