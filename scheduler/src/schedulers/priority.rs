use crate::event::EventKind;
use crate::process::{validate_processes, ProcessRecord};
use crate::queue::ArrivalQueue;
use crate::scheduler::{Process, Scheduler, Time};
use crate::simulation::Simulation;
use crate::ScheduleError;

/// Non preemptive priority scheduling with a fixed context switch cost.
///
/// At every decision point the ready process with the lowest priority value
/// runs to completion, ties go to the earliest arrival. Switching to a
/// process that did not arrive at the current time costs `context_switch`,
/// except for the very first dispatch.
pub struct Priority {
    context_switch: Time,
}

impl Priority {
    pub fn new(context_switch: Time) -> Self {
        Priority { context_switch }
    }
}

impl Scheduler for Priority {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn validate(&self, processes: &[ProcessRecord]) -> Result<(), ScheduleError> {
        validate_processes(processes)?;
        if self.context_switch < 0 {
            return Err(ScheduleError::NegativeContextSwitch(self.context_switch));
        }
        Ok(())
    }

    fn schedule(&self, simulation: &mut Simulation<'_>) -> Result<(), ScheduleError> {
        let mut arrivals =
            ArrivalQueue::sorted_by(simulation.processes(), |process| {
                (process.arrival(), process.priority())
            });
        let mut ready: Vec<usize> = Vec::new();
        let mut clock = 0;

        while !arrivals.is_exhausted() || !ready.is_empty() {
            while let Some(index) = arrivals.pop_arrived(clock) {
                simulation.admit(index, clock)?;
                ready.push(index);
            }

            if ready.is_empty() {
                if let Some(arrival) = arrivals.next_arrival() {
                    simulation.log(clock, EventKind::Idle { until: arrival });
                    clock = arrival;
                }
                continue;
            }

            ready.sort_by_key(|&index| {
                let process = simulation.process(index);
                (process.priority(), process.arrival())
            });
            let index = ready.remove(0);

            if clock > 0 && simulation.process(index).arrival() != clock {
                clock += self.context_switch;
                let pid = simulation.process(index).pid();
                simulation.log(
                    clock,
                    EventKind::ContextSwitch {
                        pid,
                        overhead: self.context_switch,
                    },
                );
            }

            simulation.dispatch(index, clock)?;
            let start = clock;
            clock += simulation.process(index).burst();
            simulation.process_mut(index).remaining = 0;
            simulation.record(index, start, clock)?;
            simulation.complete(index, clock)?;
        }

        Ok(())
    }
}
