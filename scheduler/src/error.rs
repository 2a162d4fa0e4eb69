use crate::scheduler::{Pid, Time};

/// Errors reported by a scheduling run.
///
/// Validation errors are returned before the simulation starts. Structural
/// errors mean a scheduling invariant was broken mid-run; the partial
/// results of that run are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// No processes were supplied.
    Empty,
    /// Two processes share the same PID.
    DuplicatePid(Pid),
    /// A process requires no CPU time, so it could never make progress.
    InvalidBurst { pid: Pid, burst: Time },
    /// A process arrives before time 0.
    NegativeArrival { pid: Pid, arrival: Time },
    /// The context switch overhead is negative.
    NegativeContextSwitch(Time),
    /// A process has no usable FCAI quantum.
    InvalidQuantum { pid: Pid, quantum: Time },
    /// The FCAI scale divisors would be zero.
    DegenerateScale { max_arrival: Time, max_burst: Time },
    /// A slot with `start >= end`, or an extension that does not grow the slot.
    InvalidSlot { pid: Pid, start: Time, end: Time },
    /// A completed process was put back into a ready structure.
    Reentered { pid: Pid, time: Time },
    /// The run ended while a process still had work left.
    Unfinished { pid: Pid, remaining: Time },
}

impl ScheduleError {
    /// Returns `true` for errors that indicate a broken scheduling invariant
    /// rather than bad input.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidSlot { .. }
                | ScheduleError::Reentered { .. }
                | ScheduleError::Unfinished { .. }
        )
    }
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::Empty => write!(f, "no processes to schedule"),
            ScheduleError::DuplicatePid(pid) => write!(f, "duplicate process id P{pid}"),
            ScheduleError::InvalidBurst { pid, burst } => {
                write!(f, "P{pid}: burst time must be positive, got {burst}")
            }
            ScheduleError::NegativeArrival { pid, arrival } => {
                write!(f, "P{pid}: arrival time must not be negative, got {arrival}")
            }
            ScheduleError::NegativeContextSwitch(time) => {
                write!(f, "context switch time must not be negative, got {time}")
            }
            ScheduleError::InvalidQuantum { pid, quantum } => {
                write!(f, "P{pid}: quantum must be at least 1, got {quantum}")
            }
            ScheduleError::DegenerateScale {
                max_arrival,
                max_burst,
            } => write!(
                f,
                "FCAI scale is zero (max arrival {max_arrival}, max burst {max_burst})"
            ),
            ScheduleError::InvalidSlot { pid, start, end } => {
                write!(f, "P{pid}: invalid execution slot [{start}, {end})")
            }
            ScheduleError::Reentered { pid, time } => {
                write!(f, "P{pid}: completed process re-entered the ready queue at {time}")
            }
            ScheduleError::Unfinished { pid, remaining } => {
                write!(f, "P{pid}: run ended with {remaining} units of work left")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}
