use std::collections::HashMap;

use pretty_assertions::assert_eq;
use scheduler::{
    ExecutionSlot, Observer, Pid, Policy, ProcessDescriptor, ProcessRecord, ScheduleError,
};

use super::check_schedule;

fn workload() -> Vec<ProcessDescriptor> {
    vec![
        ProcessDescriptor::new(1, 4, 0, 17).with_quantum(4),
        ProcessDescriptor::new(2, 9, 3, 6).with_quantum(3),
        ProcessDescriptor::new(3, 3, 4, 10).with_quantum(5),
        ProcessDescriptor::new(4, 8, 29, 4).with_quantum(2),
        ProcessDescriptor::new(5, 1, 12, 1).with_quantum(1),
    ]
}

#[test]
pub fn every_policy_conserves_work() {
    let processes = workload();
    for policy in Policy::ALL {
        let schedule = policy.build(2).run(&processes).unwrap();
        check_schedule(&schedule, &processes);
    }
}

#[test]
pub fn runs_do_not_touch_the_input() {
    let processes = workload();
    let before = processes.clone();
    for policy in Policy::ALL {
        let first = policy.build(1).run(&processes).unwrap();
        let second = policy.build(1).run(&processes).unwrap();
        assert_eq!(first.timeline, second.timeline);
        assert_eq!(first.order, second.order);
        assert_eq!(first.statistics, second.statistics);
    }
    assert_eq!(processes, before);
}

#[test]
pub fn every_policy_validates_input() {
    let duplicate = vec![
        ProcessDescriptor::new(1, 0, 0, 2).with_quantum(2),
        ProcessDescriptor::new(1, 0, 5, 2).with_quantum(2),
    ];
    let zero_burst = vec![
        ProcessDescriptor::new(1, 0, 0, 2).with_quantum(2),
        ProcessDescriptor::new(2, 0, 5, 0).with_quantum(2),
    ];
    let negative_arrival = vec![
        ProcessDescriptor::new(1, 0, -3, 2).with_quantum(2),
        ProcessDescriptor::new(2, 0, 5, 1).with_quantum(2),
    ];

    for policy in Policy::ALL {
        let scheduler = policy.build(0);
        assert_eq!(scheduler.run(&[]).unwrap_err(), ScheduleError::Empty);
        assert_eq!(
            scheduler.run(&duplicate).unwrap_err(),
            ScheduleError::DuplicatePid(Pid::new(1))
        );
        assert_eq!(
            scheduler.run(&zero_burst).unwrap_err(),
            ScheduleError::InvalidBurst {
                pid: Pid::new(2),
                burst: 0
            }
        );
        assert_eq!(
            scheduler.run(&negative_arrival).unwrap_err(),
            ScheduleError::NegativeArrival {
                pid: Pid::new(1),
                arrival: -3
            }
        );
    }
}

#[test]
pub fn validation_errors_are_not_structural() {
    assert!(!ScheduleError::Empty.is_structural());
    assert!(ScheduleError::Reentered {
        pid: Pid::new(1),
        time: 4
    }
    .is_structural());
    assert_eq!(
        ScheduleError::InvalidSlot {
            pid: Pid::new(3),
            start: 5,
            end: 5
        }
        .to_string(),
        "P3: invalid execution slot [5, 5)"
    );
}

#[derive(Default)]
struct Counter {
    updates: usize,
    busy: HashMap<Pid, i64>,
    completed: Vec<Pid>,
}

impl Observer for Counter {
    fn slot_recorded(&mut self, slot: &ExecutionSlot, _processes: &[ProcessRecord]) {
        self.updates += 1;
        self.busy.insert(slot.pid, slot.end);
    }

    fn completed(&mut self, process: &ProcessRecord) {
        self.completed.push(scheduler::Process::pid(process));
    }
}

#[test]
pub fn observer_sees_every_slot_and_completion() {
    let processes = workload();
    for policy in Policy::ALL {
        let mut counter = Counter::default();
        let schedule = policy.build(0).run_with(&processes, &mut counter).unwrap();

        assert!(counter.updates >= schedule.timeline.len());
        assert_eq!(counter.completed.len(), processes.len());
        for process in &schedule.processes {
            let pid = scheduler::Process::pid(process);
            assert_eq!(counter.busy[&pid], process.completion());
        }
    }
}

#[test]
pub fn policies_parse_by_name() {
    assert_eq!("fcai".parse::<Policy>(), Ok(Policy::Fcai));
    assert_eq!("Aging-SRTF".parse::<Policy>(), Ok(Policy::AgingSrtf));
    assert_eq!(Policy::Priority.to_string(), "priority");
    assert!("round-robin".parse::<Policy>().is_err());
}
