use log::debug;

use crate::event::EventKind;
use crate::process::{validate_processes, ProcessRecord};
use crate::queue::ReadyDeque;
use crate::scheduler::{Process, Scheduler, Time};
use crate::simulation::Simulation;
use crate::ScheduleError;

/// Quantum granted on top of the current one when a process uses its
/// whole slice without being preempted.
pub const QUANTUM_BONUS: Time = 2;

/// Share of the quantum a process runs before it can be preempted.
const SERVICE_SHARE: f64 = 0.4;

/// Factor based, cyclic, adaptive preemption.
///
/// A round robin over a double ended ready queue. Every process carries a
/// factor built from its priority, arrival time and remaining burst, scaled
/// by `V1 = max arrival / 10` and `V2 = max burst / 10`. The head of the
/// queue first runs the first 40% of its quantum. After that, and after each
/// admission while it runs the rest of its quantum, any queued process with
/// a strictly smaller factor takes its place at the front and the head
/// moves to the back. Quanta grow: a preempted process keeps its unused
/// time, a process that exhausts its slice gets [`QUANTUM_BONUS`] more.
pub struct Fcai;

impl Fcai {
    pub fn new() -> Self {
        Fcai
    }
}

impl Default for Fcai {
    fn default() -> Self {
        Self::new()
    }
}

/// The divisors of the arrival and remaining burst terms of the factor.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Scale {
    v1: f64,
    v2: f64,
}

impl Scale {
    fn of(processes: &[ProcessRecord]) -> Result<Scale, ScheduleError> {
        let max_arrival = processes.iter().map(|p| p.arrival()).max().unwrap_or(0);
        let max_burst = processes.iter().map(|p| p.burst()).max().unwrap_or(0);
        if max_arrival <= 0 || max_burst <= 0 {
            return Err(ScheduleError::DegenerateScale {
                max_arrival,
                max_burst,
            });
        }
        Ok(Scale {
            v1: max_arrival as f64 / 10.0,
            v2: max_burst as f64 / 10.0,
        })
    }
}

/// Time the process runs before the first preemption check.
fn service_slice(quantum: Time) -> Time {
    (SERVICE_SHARE * quantum as f64).ceil() as Time
}

impl Fcai {
    fn update_factor(simulation: &mut Simulation<'_>, index: usize, scale: Scale, time: Time) {
        let process = simulation.process_mut(index);
        process.update_factor(scale.v1, scale.v2);
        let pid = process.pid();
        let factor = process.fcai_factor();
        simulation.log(time, EventKind::FactorUpdated { pid, factor });
    }

    fn set_quantum(simulation: &mut Simulation<'_>, index: usize, quantum: Time, time: Time) {
        let process = simulation.process_mut(index);
        process.quantum = quantum;
        let pid = process.pid();
        simulation.log(time, EventKind::QuantumUpdated { pid, quantum });
    }

    /// The queued process with the smallest factor strictly below the one
    /// of `head`. Ties go to the process closest to the front.
    fn preemptor(simulation: &Simulation<'_>, ready: &ReadyDeque, head: usize) -> Option<usize> {
        let threshold = simulation.process(head).fcai_factor();
        let mut best: Option<(usize, f64)> = None;
        for index in ready.iter() {
            let factor = simulation.process(index).fcai_factor();
            if factor < threshold && best.map_or(true, |(_, min)| factor < min) {
                best = Some((index, factor));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Puts `candidate` at the front of the queue and `head` at the back.
    fn preempt(
        simulation: &mut Simulation<'_>,
        ready: &mut ReadyDeque,
        head: usize,
        candidate: usize,
        time: Time,
    ) {
        ready.remove(candidate);
        ready.remove(head);
        ready.push_front(candidate);
        ready.push_back(head);
        simulation.requeue(head);

        let pid = simulation.process(head).pid();
        let by = simulation.process(candidate).pid();
        debug!("[{time}] P{pid} preempted by P{by}");
        simulation.log(time, EventKind::Preempted { pid, by });
    }
}

impl Scheduler for Fcai {
    fn name(&self) -> &'static str {
        "FCAI"
    }

    fn validate(&self, processes: &[ProcessRecord]) -> Result<(), ScheduleError> {
        validate_processes(processes)?;
        for process in processes {
            if process.initial_quantum() < 1 {
                return Err(ScheduleError::InvalidQuantum {
                    pid: process.pid(),
                    quantum: process.initial_quantum(),
                });
            }
        }
        Scale::of(processes).map(|_| ())
    }

    fn schedule(&self, simulation: &mut Simulation<'_>) -> Result<(), ScheduleError> {
        let scale = Scale::of(simulation.processes())?;
        let total = simulation.len();
        let mut arrivals = simulation.arrivals();
        let mut ready = ReadyDeque::new();

        let mut clock = arrivals.next_arrival().unwrap_or(0);
        for index in 0..total {
            Self::update_factor(simulation, index, scale, clock);
        }

        if let Some(first) = arrivals.pop() {
            simulation.admit(first, clock)?;
            ready.push_front(first);
        }

        let mut done = 0;
        while done != total {
            if ready.is_empty() {
                // Nothing else to run: the next process is admitted even if it
                // has not arrived yet, the clock stays where it is.
                let Some(index) = arrivals.pop() else {
                    break;
                };
                simulation.admit(index, clock)?;
                ready.push_front(index);
            }
            let Some(head) = ready.front() else {
                break;
            };

            simulation.dispatch(head, clock)?;
            let process = simulation.process_mut(head);
            let quantum = process.quantum;
            let exec = service_slice(quantum).min(process.remaining);
            process.remaining -= exec;
            let start = clock;
            clock += exec;
            let mut unused = quantum - exec;
            simulation.record(head, start, clock)?;

            if simulation.process(head).remaining() <= 0 {
                simulation.complete(head, clock)?;
                ready.remove(head);
                done += 1;
                continue;
            }

            if let Some(candidate) = Self::preemptor(simulation, &ready, head) {
                Self::update_factor(simulation, head, scale, clock);
                Self::set_quantum(simulation, head, quantum + unused, clock);
                Self::preempt(simulation, &mut ready, head, candidate, clock);
                continue;
            }

            let mut preempted = false;
            while unused > 0 && simulation.process(head).remaining() > 0 {
                simulation.process_mut(head).remaining -= 1;
                unused -= 1;
                clock += 1;
                simulation.extend(head, clock)?;

                let arrived = arrivals.pop_arrived(clock);
                if let Some(arrived) = arrived {
                    simulation.admit(arrived, clock)?;
                    ready.push_back(arrived);
                }

                // A finished head leaves through the completion path below.
                if simulation.process(head).remaining() <= 0 {
                    break;
                }

                if arrived.is_some() {
                    if let Some(candidate) = Self::preemptor(simulation, &ready, head) {
                        Self::preempt(simulation, &mut ready, head, candidate, clock);
                        preempted = true;
                        break;
                    }
                }
            }

            if simulation.process(head).remaining() <= 0 {
                simulation.complete(head, clock)?;
                ready.remove(head);
                done += 1;
                continue;
            }

            if unused == 0 && !preempted {
                ready.remove(head);
                ready.push_back(head);
                simulation.requeue(head);
                let pid = simulation.process(head).pid();
                simulation.log(clock, EventKind::SliceExhausted { pid });
            }

            let tail = ready.back().unwrap_or(head);
            let bonus = if unused == 0 { QUANTUM_BONUS } else { unused };
            let quantum = simulation.process(tail).quantum() + bonus;
            Self::set_quantum(simulation, tail, quantum, clock);
            Self::update_factor(simulation, tail, scale, clock);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProcessDescriptor;

    #[test]
    fn service_slice_rounds_up() {
        assert_eq!(service_slice(1), 1);
        assert_eq!(service_slice(3), 2);
        assert_eq!(service_slice(4), 2);
        assert_eq!(service_slice(5), 2);
        assert_eq!(service_slice(6), 3);
    }

    #[test]
    fn scale_rejects_zero_divisors() {
        let processes: Vec<ProcessRecord> = [
            ProcessDescriptor::new(1, 0, 0, 4).with_quantum(4),
            ProcessDescriptor::new(2, 0, 0, 4).with_quantum(4),
        ]
        .iter()
        .map(ProcessRecord::new)
        .collect();

        assert_eq!(
            Scale::of(&processes),
            Err(ScheduleError::DegenerateScale {
                max_arrival: 0,
                max_burst: 4
            })
        );
    }
}
