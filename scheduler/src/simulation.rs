use log::{debug, trace};

use crate::event::{Event, EventKind};
use crate::process::ProcessRecord;
use crate::queue::ArrivalQueue;
use crate::scheduler::{Observer, Process, ProcessState, Time};
use crate::schedule::{Schedule, Statistics};
use crate::timeline::Timeline;
use crate::ScheduleError;

/// The state of a single run: the process records, the timeline and the
/// event log, all exclusively owned by the policy that runs.
///
/// Policies address processes by their index in the input list.
pub struct Simulation<'a> {
    processes: Vec<ProcessRecord>,
    timeline: Timeline,
    events: Vec<Event>,
    order: Vec<crate::Pid>,
    observer: &'a mut dyn Observer,
}

impl<'a> Simulation<'a> {
    pub fn new(processes: Vec<ProcessRecord>, observer: &'a mut dyn Observer) -> Self {
        Simulation {
            processes,
            timeline: Timeline::new(),
            events: Vec::new(),
            order: Vec::new(),
            observer,
        }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn process(&self, index: usize) -> &ProcessRecord {
        &self.processes[index]
    }

    pub(crate) fn process_mut(&mut self, index: usize) -> &mut ProcessRecord {
        &mut self.processes[index]
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The not yet admitted processes, by arrival time.
    pub fn arrivals(&self) -> ArrivalQueue {
        ArrivalQueue::new(&self.processes)
    }

    pub fn log(&mut self, time: Time, kind: EventKind) {
        trace!("[{time}] {kind}");
        self.events.push(Event { time, kind });
    }

    /// Marks the process as ready. Completed processes cannot come back.
    pub fn admit(&mut self, index: usize, time: Time) -> Result<(), ScheduleError> {
        let process = &mut self.processes[index];
        if process.is_completed() {
            return Err(ScheduleError::Reentered {
                pid: process.pid(),
                time,
            });
        }
        process.set_state(ProcessState::Ready);
        let pid = process.pid();
        self.log(time, EventKind::Admitted { pid });
        Ok(())
    }

    /// Hands the CPU to the process.
    pub fn dispatch(&mut self, index: usize, time: Time) -> Result<(), ScheduleError> {
        let process = &mut self.processes[index];
        if process.is_completed() {
            return Err(ScheduleError::Reentered {
                pid: process.pid(),
                time,
            });
        }
        process.set_state(ProcessState::Running);
        let pid = process.pid();
        debug!("[{time}] dispatch P{pid}, remaining {}", process.remaining());
        self.order.push(pid);
        self.log(time, EventKind::Dispatched { pid });
        Ok(())
    }

    /// Puts a running process back in the ready state.
    pub fn requeue(&mut self, index: usize) {
        if !self.processes[index].is_completed() {
            self.processes[index].set_state(ProcessState::Ready);
        }
    }

    /// Appends the slot `[start, end)` for the process.
    pub fn record(&mut self, index: usize, start: Time, end: Time) -> Result<(), ScheduleError> {
        let slot = self.timeline.push(self.processes[index].pid(), start, end)?;
        self.observer.slot_recorded(&slot, &self.processes);
        Ok(())
    }

    /// Moves the end of the process's current slot to `end`.
    pub fn extend(&mut self, index: usize, end: Time) -> Result<(), ScheduleError> {
        let slot = self.timeline.extend(self.processes[index].pid(), end)?;
        self.observer.slot_recorded(&slot, &self.processes);
        Ok(())
    }

    /// Stamps completion, turnaround and waiting time of the process.
    pub fn complete(&mut self, index: usize, time: Time) -> Result<(), ScheduleError> {
        let process = &mut self.processes[index];
        if process.is_completed() {
            return Err(ScheduleError::Reentered {
                pid: process.pid(),
                time,
            });
        }
        process.complete(time);
        let (_, turnaround, waiting) = process.timings();
        let pid = process.pid();
        debug!("[{time}] P{pid} completed, turnaround {turnaround}, waiting {waiting}");
        self.log(
            time,
            EventKind::Completed {
                pid,
                turnaround,
                waiting,
            },
        );
        self.observer.completed(&self.processes[index]);
        Ok(())
    }

    /// Ends the run, every process has to be completed.
    pub fn finish(self, policy: &'static str) -> Result<Schedule, ScheduleError> {
        if let Some(process) = self.processes.iter().find(|process| !process.is_completed()) {
            return Err(ScheduleError::Unfinished {
                pid: process.pid(),
                remaining: process.remaining(),
            });
        }

        let statistics = Statistics::from_processes(&self.processes);
        debug!(
            "{policy}: average waiting {:.2}, average turnaround {:.2}",
            statistics.average_waiting_time, statistics.average_turnaround_time
        );

        Ok(Schedule {
            policy,
            timeline: self.timeline,
            processes: self.processes,
            events: self.events,
            order: self.order,
            statistics,
        })
    }
}
