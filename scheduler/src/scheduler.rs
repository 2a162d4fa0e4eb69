use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::process::{validate_processes, ProcessDescriptor, ProcessRecord};
use crate::simulation::Simulation;
use crate::timeline::ExecutionSlot;
use crate::{Schedule, ScheduleError};

/// Simulated time, in abstract time units.
///
/// Signed so that invalid (negative) inputs can be reported instead of
/// being unrepresentable.
pub type Time = i64;

/// The PID of a process, as assigned by the caller.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The state of a simulated process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ProcessState {
    /// The process has not been admitted to any ready structure yet.
    Pending,

    /// The process is waiting in a ready structure.
    Ready,

    /// The process currently occupies the CPU.
    Running,

    /// The process has consumed its whole burst.
    ///
    /// A completed process never re-enters a ready structure.
    Completed,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Pending => write!(f, "PENDING"),
            ProcessState::Ready => write!(f, "READY"),
            ProcessState::Running => write!(f, "RUNNING"),
            ProcessState::Completed => write!(f, "DONE"),
        }
    }
}

/// Read-only view of a process, used by collaborators that render
/// the results of a run.
pub trait Process {
    /// Return the PID of the process.
    fn pid(&self) -> Pid;

    /// Return the display name of the process.
    fn name(&self) -> &str;

    /// Return the state of the process.
    fn state(&self) -> ProcessState;

    /// Returns the process priority (lower value means higher precedence).
    fn priority(&self) -> i32;

    /// Returns the arrival time of the process.
    fn arrival(&self) -> Time;

    /// Returns the total CPU time the process requires.
    fn burst(&self) -> Time;

    /// Returns process timings as a tuple of (completion, turnaround, waiting)
    fn timings(&self) -> (Time, Time, Time);

    /// Returns details information
    fn extra(&self) -> String;
}

/// Receives notifications while a policy runs.
///
/// Observers are side channels: they see the timeline as it grows but
/// can never influence a scheduling decision.
pub trait Observer {
    /// Called after a slot was appended to the timeline or extended.
    fn slot_recorded(&mut self, _slot: &ExecutionSlot, _processes: &[ProcessRecord]) {}

    /// Called after a process completed.
    fn completed(&mut self, _process: &ProcessRecord) {}
}

/// An observer that ignores every notification.
pub struct NoObserver;

impl Observer for NoObserver {}

/// The capability that every scheduling policy implements.
///
/// A policy only has to provide [`Scheduler::schedule`]; input validation,
/// copying of the descriptors and result assembly are shared.
pub trait Scheduler: Send + Sync {
    /// Returns the display name of the policy.
    fn name(&self) -> &'static str;

    /// Rejects inputs the policy cannot simulate.
    ///
    /// The default checks what every policy needs; policies with extra
    /// requirements call it first and add their own checks.
    fn validate(&self, processes: &[ProcessRecord]) -> Result<(), ScheduleError> {
        validate_processes(processes)
    }

    /// Runs the simulation to completion over the records owned by `simulation`.
    fn schedule(&self, simulation: &mut Simulation<'_>) -> Result<(), ScheduleError>;

    /// Simulates the given processes and returns the resulting schedule.
    ///
    /// The descriptors are copied, so the same input can be handed to
    /// several policies.
    fn run(&self, processes: &[ProcessDescriptor]) -> Result<Schedule, ScheduleError> {
        self.run_with(processes, &mut NoObserver)
    }

    /// Same as [`Scheduler::run`], notifying `observer` as the timeline grows.
    fn run_with(
        &self,
        processes: &[ProcessDescriptor],
        observer: &mut dyn Observer,
    ) -> Result<Schedule, ScheduleError> {
        let records: Vec<ProcessRecord> = processes.iter().map(ProcessRecord::new).collect();
        self.validate(&records)?;

        let mut simulation = Simulation::new(records, observer);
        self.schedule(&mut simulation)?;
        simulation.finish(self.name())
    }
}
