use std::fmt::Display;

use serde::Serialize;

use crate::scheduler::{Pid, Time};
use crate::ScheduleError;

/// One contiguous interval `[start, end)` during which a process occupied the CPU.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionSlot {
    pub pid: Pid,
    pub start: Time,
    pub end: Time,
}

impl ExecutionSlot {
    pub fn new(pid: Pid, start: Time, end: Time) -> Self {
        ExecutionSlot { pid, start, end }
    }

    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

impl Display for ExecutionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{} [{}, {})", self.pid, self.start, self.end)
    }
}

/// Append-only log of execution slots, in the order they were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    slots: Vec<ExecutionSlot>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new slot.
    pub fn push(&mut self, pid: Pid, start: Time, end: Time) -> Result<ExecutionSlot, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidSlot { pid, start, end });
        }
        let slot = ExecutionSlot::new(pid, start, end);
        self.slots.push(slot);
        Ok(slot)
    }

    /// Moves the end of the last slot to `end`.
    ///
    /// The last slot has to belong to `pid` and has to grow.
    pub fn extend(&mut self, pid: Pid, end: Time) -> Result<ExecutionSlot, ScheduleError> {
        match self.slots.last_mut() {
            Some(slot) if slot.pid == pid && end > slot.end => {
                slot.end = end;
                Ok(*slot)
            }
            Some(slot) => Err(ScheduleError::InvalidSlot {
                pid,
                start: slot.start,
                end,
            }),
            None => Err(ScheduleError::InvalidSlot { pid, start: end, end }),
        }
    }

    pub fn last(&self) -> Option<&ExecutionSlot> {
        self.slots.last()
    }

    pub fn slots(&self) -> &[ExecutionSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slots of a single process, in emission order.
    pub fn slots_of(&self, pid: Pid) -> impl Iterator<Item = &ExecutionSlot> + '_ {
        self.slots.iter().filter(move |slot| slot.pid == pid)
    }

    /// Total time the process spent on the CPU.
    pub fn busy_time(&self, pid: Pid) -> Time {
        self.slots_of(pid).map(ExecutionSlot::duration).sum()
    }

    /// End of the last interval in the timeline.
    pub fn makespan(&self) -> Time {
        self.slots.iter().map(|slot| slot.end).max().unwrap_or(0)
    }
}

impl Display for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots: Vec<String> = self.slots.iter().map(ToString::to_string).collect();
        write!(f, "{}", slots.join(" "))
    }
}
