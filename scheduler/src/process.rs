use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::scheduler::{Pid, Process, ProcessState, Time};
use crate::ScheduleError;

/// The description of a process, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub id: Pid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    pub arrival_time: Time,
    pub burst_time: Time,
    /// Initial quantum, only used by the FCAI policy.
    #[serde(default)]
    pub quantum: Time,
}

impl ProcessDescriptor {
    pub fn new(id: usize, priority: i32, arrival_time: Time, burst_time: Time) -> Self {
        ProcessDescriptor {
            id: Pid::new(id),
            name: format!("P{id}"),
            priority,
            arrival_time,
            burst_time,
            quantum: 0,
        }
    }

    pub fn with_quantum(mut self, quantum: Time) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

/// A simulated process and its run-time state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRecord {
    pid: Pid,
    name: String,
    priority: i32,
    arrival: Time,
    burst: Time,
    initial_quantum: Time,
    state: ProcessState,

    pub(crate) remaining: Time,
    pub(crate) quantum: Time,
    pub(crate) wait_ticks: u32,
    pub(crate) aging_credit: Time,
    pub(crate) fcai_factor: f64,

    completion: Time,
    turnaround: Time,
    waiting: Time,
}

impl ProcessRecord {
    pub fn new(descriptor: &ProcessDescriptor) -> Self {
        ProcessRecord {
            pid: descriptor.id,
            name: descriptor.name.clone(),
            priority: descriptor.priority,
            arrival: descriptor.arrival_time,
            burst: descriptor.burst_time,
            initial_quantum: descriptor.quantum,
            state: ProcessState::Pending,
            remaining: descriptor.burst_time,
            quantum: descriptor.quantum,
            wait_ticks: 0,
            aging_credit: 0,
            fcai_factor: 0.0,
            completion: 0,
            turnaround: 0,
            waiting: 0,
        }
    }

    pub fn remaining(&self) -> Time {
        self.remaining
    }

    pub fn initial_quantum(&self) -> Time {
        self.initial_quantum
    }

    pub fn quantum(&self) -> Time {
        self.quantum
    }

    pub fn fcai_factor(&self) -> f64 {
        self.fcai_factor
    }

    pub fn completion(&self) -> Time {
        self.completion
    }

    pub fn turnaround(&self) -> Time {
        self.turnaround
    }

    /// Waiting time as computed, possibly negative.
    pub fn waiting(&self) -> Time {
        self.waiting
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }

    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Recomputes the FCAI factor with the run's scale divisors.
    pub(crate) fn update_factor(&mut self, v1: f64, v2: f64) {
        self.fcai_factor = 10.0 - self.priority as f64
            + (self.arrival as f64 / v1).ceil()
            + (self.remaining as f64 / v2).ceil();
    }

    pub(crate) fn complete(&mut self, time: Time) {
        self.state = ProcessState::Completed;
        self.completion = time;
        self.turnaround = self.completion - self.arrival;
        self.waiting = self.turnaround - self.burst;
    }
}

impl Process for ProcessRecord {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn arrival(&self) -> Time {
        self.arrival
    }

    fn burst(&self) -> Time {
        self.burst
    }

    fn timings(&self) -> (Time, Time, Time) {
        (self.completion, self.turnaround, self.waiting)
    }

    fn extra(&self) -> String {
        let mut extra = format!("remaining={}", self.remaining);
        if self.initial_quantum > 0 {
            extra.push_str(&format!(" quantum={} factor={}", self.quantum, self.fcai_factor));
        }
        if self.aging_credit > 0 {
            extra.push_str(&format!(" aging={}", self.aging_credit));
        }
        extra
    }
}

/// Checks the requirements shared by every policy.
pub fn validate_processes(processes: &[ProcessRecord]) -> Result<(), ScheduleError> {
    if processes.is_empty() {
        return Err(ScheduleError::Empty);
    }

    let mut pids = HashSet::new();
    for process in processes {
        if !pids.insert(process.pid()) {
            return Err(ScheduleError::DuplicatePid(process.pid()));
        }
        if process.burst() <= 0 {
            return Err(ScheduleError::InvalidBurst {
                pid: process.pid(),
                burst: process.burst(),
            });
        }
        if process.arrival() < 0 {
            return Err(ScheduleError::NegativeArrival {
                pid: process.pid(),
                arrival: process.arrival(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(descriptors: &[ProcessDescriptor]) -> Vec<ProcessRecord> {
        descriptors.iter().map(ProcessRecord::new).collect()
    }

    #[test]
    fn rejects_duplicate_pids() {
        let processes = records(&[
            ProcessDescriptor::new(1, 0, 0, 3),
            ProcessDescriptor::new(1, 0, 2, 3),
        ]);
        assert_eq!(
            validate_processes(&processes),
            Err(ScheduleError::DuplicatePid(Pid::new(1)))
        );
    }

    #[test]
    fn rejects_zero_burst() {
        let processes = records(&[ProcessDescriptor::new(4, 0, 0, 0)]);
        assert_eq!(
            validate_processes(&processes),
            Err(ScheduleError::InvalidBurst {
                pid: Pid::new(4),
                burst: 0
            })
        );
    }

    #[test]
    fn rejects_negative_arrival() {
        let processes = records(&[ProcessDescriptor::new(2, 0, -1, 3)]);
        assert_eq!(
            validate_processes(&processes),
            Err(ScheduleError::NegativeArrival {
                pid: Pid::new(2),
                arrival: -1
            })
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(validate_processes(&[]), Err(ScheduleError::Empty));
    }

    #[test]
    fn factor_combines_priority_arrival_and_remaining() {
        let mut process = ProcessRecord::new(&ProcessDescriptor::new(1, 3, 4, 6).with_quantum(3));
        process.update_factor(2.0, 1.5);
        // (10 - 3) + ceil(4 / 2) + ceil(6 / 1.5)
        assert_eq!(process.fcai_factor(), 13.0);
    }

    #[test]
    fn factor_handles_extreme_priorities() {
        let mut low = ProcessRecord::new(&ProcessDescriptor::new(1, i32::MIN, 1, 1).with_quantum(1));
        low.update_factor(1.0, 1.0);
        assert_eq!(low.fcai_factor(), 10.0 - i32::MIN as f64 + 2.0);

        let mut high = ProcessRecord::new(&ProcessDescriptor::new(2, i32::MAX, 1, 1).with_quantum(1));
        high.update_factor(1.0, 1.0);
        assert_eq!(high.fcai_factor(), 10.0 - i32::MAX as f64 + 2.0);
    }

    #[test]
    fn completion_stamps_turnaround_and_waiting() {
        let mut process = ProcessRecord::new(&ProcessDescriptor::new(1, 0, 2, 3));
        process.complete(8);
        assert_eq!(process.timings(), (8, 6, 3));
        assert!(process.is_completed());
    }
}
