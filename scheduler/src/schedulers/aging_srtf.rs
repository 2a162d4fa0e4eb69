use log::trace;

use crate::event::EventKind;
use crate::scheduler::{Process, Scheduler, Time};
use crate::simulation::Simulation;
use crate::ScheduleError;

/// Ticks a process waits in the ready set before it is aged.
pub const AGING_THRESHOLD: u32 = 5;

/// Remaining time taken off a process each time it is aged.
pub const AGING_DECREMENT: Time = 1;

/// Shortest remaining time first with wait based aging.
///
/// The simulation advances one time unit per tick. Waiting processes are
/// aged every [`AGING_THRESHOLD`] ticks, which lowers their remaining time
/// and so moves them forward in the ready order. The aging credit is given
/// back when the process is dispatched, so the work it performs is its
/// full burst. A dispatched process keeps the CPU until it completes.
pub struct AgingSrtf;

impl AgingSrtf {
    pub fn new() -> Self {
        AgingSrtf
    }
}

impl Default for AgingSrtf {
    fn default() -> Self {
        Self::new()
    }
}

impl AgingSrtf {
    /// Removes the ready process with the smallest
    /// (remaining, arrival, priority), ties go to the earliest admitted.
    fn pop_shortest(ready: &mut Vec<usize>, simulation: &Simulation<'_>) -> Option<usize> {
        let position = ready
            .iter()
            .enumerate()
            .min_by_key(|&(position, &index)| {
                let process = simulation.process(index);
                (process.remaining(), process.arrival(), process.priority(), position)
            })
            .map(|(position, _)| position)?;
        Some(ready.remove(position))
    }

    fn age(ready: &[usize], simulation: &mut Simulation<'_>, clock: Time) {
        for &index in ready {
            let process = simulation.process_mut(index);
            process.wait_ticks += 1;
            if process.wait_ticks >= AGING_THRESHOLD {
                process.wait_ticks = 0;
                process.remaining -= AGING_DECREMENT;
                process.aging_credit += AGING_DECREMENT;
                let pid = process.pid();
                let remaining = process.remaining();
                simulation.log(clock, EventKind::Aged { pid, remaining });
            }
        }
    }
}

impl Scheduler for AgingSrtf {
    fn name(&self) -> &'static str {
        "Aging SRTF"
    }

    fn schedule(&self, simulation: &mut Simulation<'_>) -> Result<(), ScheduleError> {
        let mut arrivals = simulation.arrivals();
        let mut ready: Vec<usize> = Vec::new();
        let mut running: Option<usize> = None;
        let mut clock = 0;

        while !arrivals.is_exhausted() || !ready.is_empty() || running.is_some() {
            while let Some(index) = arrivals.pop_arrived(clock) {
                simulation.admit(index, clock)?;
                ready.push(index);
            }

            Self::age(&ready, simulation, clock);

            if running.is_none() {
                if let Some(index) = Self::pop_shortest(&mut ready, simulation) {
                    let process = simulation.process_mut(index);
                    process.remaining += process.aging_credit;
                    process.aging_credit = 0;
                    simulation.dispatch(index, clock)?;
                    running = Some(index);
                }
            }

            if let Some(index) = running {
                let process = simulation.process_mut(index);
                process.remaining -= 1;
                let pid = process.pid();
                let remaining = process.remaining();
                trace!("[{clock}] P{pid} ran, remaining {remaining}");

                let contiguous = matches!(
                    simulation.timeline().last(),
                    Some(slot) if slot.pid == pid && slot.end == clock
                );
                if contiguous {
                    simulation.extend(index, clock + 1)?;
                } else {
                    simulation.record(index, clock, clock + 1)?;
                }

                if remaining == 0 {
                    simulation.complete(index, clock + 1)?;
                    running = None;
                }
            }

            clock += 1;
        }

        Ok(())
    }
}
