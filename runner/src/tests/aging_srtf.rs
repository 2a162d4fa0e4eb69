use function_name::named;
use pretty_assertions::assert_eq;
use scheduler::{aging_srtf, EventKind, Pid, ProcessDescriptor, Time};

use super::{pids, run, slots, timings};

#[test]
#[named]
pub fn shortest_job_next() {
    let processes = vec![
        ProcessDescriptor::new(1, 0, 0, 4),
        ProcessDescriptor::new(2, 0, 1, 2),
        ProcessDescriptor::new(3, 0, 2, 1),
    ];

    let schedule = run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &aging_srtf(),
        &processes,
    );

    // A dispatched process keeps the CPU, slots of consecutive ticks merge.
    assert_eq!(
        schedule.timeline.slots(),
        slots(&[(1, 0, 4), (3, 4, 5), (2, 5, 7)])
    );
    assert_eq!(timings(&schedule, 2), (7, 6, 4));
    assert_eq!(schedule.statistics.average_waiting_time, 2.0);
}

#[test]
#[named]
pub fn aging_reorders_waiting_processes() {
    let processes = vec![
        ProcessDescriptor::new(1, 0, 0, 10),
        ProcessDescriptor::new(2, 0, 1, 4),
        ProcessDescriptor::new(3, 0, 8, 3),
    ];

    let schedule = run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &aging_srtf(),
        &processes,
    );

    // Without aging P3 (3 left) would beat P2 (4 left) at time 10.
    assert_eq!(
        schedule.timeline.slots(),
        slots(&[(1, 0, 10), (2, 10, 14), (3, 14, 17)])
    );

    let aged: Vec<(Time, Pid, Time)> = schedule
        .events
        .iter()
        .filter_map(|event| match event.kind {
            EventKind::Aged { pid, remaining } => Some((event.time, pid, remaining)),
            _ => None,
        })
        .collect();
    assert_eq!(
        aged,
        vec![
            (5, Pid::new(2), 3),
            (10, Pid::new(2), 2),
            (12, Pid::new(3), 2)
        ]
    );

    // The credit is given back on dispatch, nothing is left over.
    for process in &schedule.processes {
        assert_eq!(process.remaining(), 0);
    }
    assert_eq!(timings(&schedule, 2), (14, 13, 9));
    assert_eq!(timings(&schedule, 3), (17, 9, 6));
}

#[test]
#[named]
pub fn ties_go_to_lower_priority_value() {
    let processes = vec![
        ProcessDescriptor::new(1, 2, 0, 3),
        ProcessDescriptor::new(2, 1, 0, 3),
    ];

    let schedule = run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &aging_srtf(),
        &processes,
    );

    assert_eq!(schedule.timeline.slots(), slots(&[(2, 0, 3), (1, 3, 6)]));
    assert_eq!(schedule.order, pids(&[2, 1]));
}

#[test]
#[named]
pub fn idle_ticks_between_arrivals() {
    let processes = vec![
        ProcessDescriptor::new(1, 0, 2, 2),
        ProcessDescriptor::new(2, 0, 7, 1),
    ];

    let schedule = run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &aging_srtf(),
        &processes,
    );

    assert_eq!(schedule.timeline.slots(), slots(&[(1, 2, 4), (2, 7, 8)]));
    assert_eq!(schedule.statistics.average_waiting_time, 0.0);
}
