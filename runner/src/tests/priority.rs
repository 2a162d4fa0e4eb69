use function_name::named;
use pretty_assertions::assert_eq;
use scheduler::{priority, EventKind, Pid, ProcessDescriptor, ScheduleError, Scheduler};

use super::{pids, run, slots, timings};

#[test]
#[named]
pub fn lower_value_wins_on_arrival_tie() {
    let processes = vec![
        ProcessDescriptor::new(1, 2, 0, 4),
        ProcessDescriptor::new(2, 1, 0, 2),
    ];

    let schedule = run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &priority(0),
        &processes,
    );

    assert_eq!(schedule.timeline.slots(), slots(&[(2, 0, 2), (1, 2, 6)]));
    assert_eq!(timings(&schedule, 2), (2, 2, 0));
    assert_eq!(timings(&schedule, 1), (6, 6, 2));
}

#[test]
#[named]
pub fn context_switch_overhead() {
    let processes = vec![
        ProcessDescriptor::new(1, 3, 0, 4),
        ProcessDescriptor::new(2, 1, 1, 3),
        ProcessDescriptor::new(3, 2, 2, 2),
        ProcessDescriptor::new(4, 1, 10, 1),
    ];

    let schedule = run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &priority(1),
        &processes,
    );

    assert_eq!(
        schedule.timeline.slots(),
        slots(&[(1, 0, 4), (2, 5, 8), (3, 9, 11), (4, 12, 13)])
    );
    assert_eq!(schedule.order, pids(&[1, 2, 3, 4]));

    let switches: Vec<(i64, Pid)> = schedule
        .events
        .iter()
        .filter_map(|event| match event.kind {
            EventKind::ContextSwitch { pid, .. } => Some((event.time, pid)),
            _ => None,
        })
        .collect();
    assert_eq!(
        switches,
        vec![(5, Pid::new(2)), (9, Pid::new(3)), (12, Pid::new(4))]
    );
    assert_eq!(schedule.statistics.average_waiting_time, 3.25);
    assert_eq!(schedule.statistics.average_turnaround_time, 5.75);
}

#[test]
#[named]
pub fn no_switch_for_process_arriving_now() {
    let processes = vec![
        ProcessDescriptor::new(1, 1, 0, 2),
        ProcessDescriptor::new(2, 1, 5, 2),
        ProcessDescriptor::new(3, 0, 6, 1),
    ];

    let schedule = run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &priority(2),
        &processes,
    );

    // P2 is dispatched at its arrival time, P3 waited since 6.
    assert_eq!(
        schedule.timeline.slots(),
        slots(&[(1, 0, 2), (2, 5, 7), (3, 9, 10)])
    );
    assert_eq!(timings(&schedule, 3), (10, 4, 3));
}

#[test]
pub fn rejects_negative_context_switch() {
    let processes = vec![ProcessDescriptor::new(1, 1, 0, 2)];

    assert_eq!(
        priority(-1).run(&processes).unwrap_err(),
        ScheduleError::NegativeContextSwitch(-1)
    );
}
