//! A CPU scheduling simulation library.
//!
//! This library provides the process model, the execution timeline and
//! the scheduling policies. A policy takes a list of process descriptors,
//! simulates them to completion and returns a [`Schedule`]: the timeline,
//! the final timings of every process and the aggregate statistics.
//!
//! ```rust
//! use scheduler::{fcfs, ProcessDescriptor, Scheduler};
//!
//! let processes = vec![
//!     ProcessDescriptor::new(1, 0, 0, 5),
//!     ProcessDescriptor::new(2, 0, 2, 3),
//! ];
//! let schedule = fcfs().run(&processes).unwrap();
//! assert_eq!(schedule.statistics.average_waiting_time, 1.5);
//! ```

use std::fmt::{self, Display};
use std::str::FromStr;

mod error;
mod event;
mod process;
mod queue;
mod schedule;
mod scheduler;
mod simulation;
mod timeline;

pub use crate::error::ScheduleError;
pub use crate::event::{Event, EventKind};
pub use crate::process::{validate_processes, ProcessDescriptor, ProcessRecord};
pub use crate::queue::{ArrivalQueue, ReadyDeque};
pub use crate::schedule::{ProcessMetrics, Schedule, Statistics};
pub use crate::scheduler::{
    NoObserver, Observer, Pid, Process, ProcessState, Scheduler, Time,
};
pub use crate::simulation::Simulation;
pub use crate::timeline::{ExecutionSlot, Timeline};

pub mod schedulers;

use schedulers::{AgingSrtf, Fcai, Fcfs, Priority};

/// Returns a structure that implements the `Scheduler` trait with a first come, first served policy
pub fn fcfs() -> impl Scheduler {
    Fcfs::new()
}

/// Returns a structure that implements the `Scheduler` trait with a non preemptive priority policy
/// * `context_switch` - the time charged before dispatching a process that did
///                      not arrive at the current time. It is never charged for
///                      the first dispatch.
pub fn priority(context_switch: Time) -> impl Scheduler {
    Priority::new(context_switch)
}

/// Returns a structure that implements the `Scheduler` trait with a shortest remaining
/// time first policy where waiting processes are aged
pub fn aging_srtf() -> impl Scheduler {
    AgingSrtf::new()
}

/// Returns a structure that implements the `Scheduler` trait with the FCAI policy
///
/// Every process needs a quantum of at least 1.
pub fn fcai() -> impl Scheduler {
    Fcai::new()
}

/// The available policies, selectable by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    Priority,
    AgingSrtf,
    Fcai,
}

impl Policy {
    pub const ALL: [Policy; 4] = [Policy::Fcfs, Policy::Priority, Policy::AgingSrtf, Policy::Fcai];

    /// Builds the policy. Only [`Policy::Priority`] uses `context_switch`.
    pub fn build(self, context_switch: Time) -> Box<dyn Scheduler> {
        match self {
            Policy::Fcfs => Box::new(Fcfs::new()),
            Policy::Priority => Box::new(Priority::new(context_switch)),
            Policy::AgingSrtf => Box::new(AgingSrtf::new()),
            Policy::Fcai => Box::new(Fcai::new()),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "fcfs"),
            Policy::Priority => write!(f, "priority"),
            Policy::AgingSrtf => write!(f, "aging-srtf"),
            Policy::Fcai => write!(f, "fcai"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "priority" => Ok(Policy::Priority),
            "aging-srtf" | "srtf" | "sjf" => Ok(Policy::AgingSrtf),
            "fcai" => Ok(Policy::Fcai),
            other => Err(format!("unknown policy {other:?}")),
        }
    }
}
