use crate::event::EventKind;
use crate::scheduler::{Process, Scheduler};
use crate::simulation::Simulation;
use crate::ScheduleError;

/// First come, first served.
///
/// Processes run to completion in arrival order, ties keep input order.
pub struct Fcfs;

impl Fcfs {
    pub fn new() -> Self {
        Fcfs
    }
}

impl Default for Fcfs {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn schedule(&self, simulation: &mut Simulation<'_>) -> Result<(), ScheduleError> {
        let mut arrivals = simulation.arrivals();
        let mut clock = 0;

        while let Some(index) = arrivals.pop() {
            let arrival = simulation.process(index).arrival();
            if clock < arrival {
                simulation.log(clock, EventKind::Idle { until: arrival });
                clock = arrival;
            }
            simulation.admit(index, arrival)?;
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
