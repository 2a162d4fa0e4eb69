use std::env;
use std::fs;

use processor::{format_events, format_logs, format_schedule, Processor};
use scheduler::{ExecutionSlot, Pid, Process, ProcessDescriptor, Schedule, Scheduler, Time};

mod aging_srtf;
mod priority;
mod validation;

fn write_report(folder: &str, name: &str, report: &str) {
    fs::create_dir_all(format!("../outputs/{folder}")).unwrap();
    fs::write(format!("../outputs/{folder}/{name}.log"), report).unwrap();
}

/// Runs the scheduler over the processes, checks what has to hold for
/// every schedule and returns it.
///
/// Set `WRITE_OUTPUT` to dump the formatted results under `outputs/`.
fn run(
    folder: &str,
    name: &str,
    scheduler: &dyn Scheduler,
    processes: &[ProcessDescriptor],
) -> Schedule {
    let (schedule, logs) = Processor::run(scheduler, processes).unwrap();
    check_schedule(&schedule, processes);

    let (again, _) = Processor::run(scheduler, processes).unwrap();
    use pretty_assertions::assert_eq;
    assert_eq!(schedule.timeline, again.timeline);
    assert_eq!(schedule.metrics(), again.metrics());

    if env::var("WRITE_OUTPUT").is_ok() {
        let report = format!(
            "{}\n{}\n{}",
            format_schedule(&schedule),
            format_events(&schedule),
            format_logs(&logs)
        );
        write_report(folder, name, &report);
    }

    schedule
}

fn check_schedule(schedule: &Schedule, processes: &[ProcessDescriptor]) {
    assert_eq!(schedule.processes.len(), processes.len());

    for descriptor in processes {
        let pid = descriptor.id;
        assert_eq!(
            schedule.timeline.busy_time(pid),
            descriptor.burst_time,
            "P{pid} did not run for its whole burst"
        );

        let mut slots: Vec<&ExecutionSlot> = schedule.timeline.slots_of(pid).collect();
        slots.sort_by_key(|slot| slot.start);
        for slot in &slots {
            assert!(slot.end > slot.start, "empty slot {slot}");
        }
        for pair in slots.windows(2) {
            assert!(pair[0].end <= pair[1].start, "overlapping slots {} {}", pair[0], pair[1]);
        }

        let process = schedule.process(pid).unwrap();
        let (completion, turnaround, waiting) = process.timings();
        assert_eq!(completion, slots.last().unwrap().end);
        assert_eq!(turnaround, completion - descriptor.arrival_time);
        assert_eq!(waiting, turnaround - descriptor.burst_time);
    }
}

fn slots(expected: &[(usize, Time, Time)]) -> Vec<ExecutionSlot> {
    expected
        .iter()
        .map(|&(pid, start, end)| ExecutionSlot::new(Pid::new(pid), start, end))
        .collect()
}

fn pids(expected: &[usize]) -> Vec<Pid> {
    expected.iter().map(|&pid| Pid::new(pid)).collect()
}

/// (completion, turnaround, waiting) of the process.
fn timings(schedule: &Schedule, pid: usize) -> (Time, Time, Time) {
    schedule.process(Pid::new(pid)).unwrap().timings()
}
