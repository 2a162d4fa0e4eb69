//! Queues of process indices.
//!
//! Policies never move [`ProcessRecord`]s around. They keep indices into the
//! records owned by the simulation, so admitting or requeueing a process is
//! an index move.

use std::collections::VecDeque;

use crate::process::ProcessRecord;
use crate::scheduler::{Process, Time};

/// Processes that have not been admitted yet, ordered by arrival.
///
/// Admission advances a cursor instead of removing from the front.
#[derive(Debug, Clone)]
pub struct ArrivalQueue {
    entries: Vec<(Time, usize)>,
    cursor: usize,
}

impl ArrivalQueue {
    /// Orders the processes by arrival time, ties keep input order.
    pub fn new(processes: &[ProcessRecord]) -> Self {
        Self::sorted_by(processes, |process| process.arrival())
    }

    /// Orders the processes by `key`, ties keep input order.
    ///
    /// The key has to order arrival times first.
    pub fn sorted_by<K, F>(processes: &[ProcessRecord], mut key: F) -> Self
    where
        K: Ord,
        F: FnMut(&ProcessRecord) -> K,
    {
        let mut indices: Vec<usize> = (0..processes.len()).collect();
        indices.sort_by_key(|&index| key(&processes[index]));
        ArrivalQueue {
            entries: indices
                .into_iter()
                .map(|index| (processes[index].arrival(), index))
                .collect(),
            cursor: 0,
        }
    }

    /// Arrival time of the next process to admit.
    pub fn next_arrival(&self) -> Option<Time> {
        self.entries.get(self.cursor).map(|&(arrival, _)| arrival)
    }

    /// Admits the next process if it has arrived by `time`.
    pub fn pop_arrived(&mut self, time: Time) -> Option<usize> {
        match self.next_arrival() {
            Some(arrival) if arrival <= time => self.pop(),
            _ => None,
        }
    }

    /// Admits the next process regardless of its arrival time.
    pub fn pop(&mut self) -> Option<usize> {
        let (_, index) = *self.entries.get(self.cursor)?;
        self.cursor += 1;
        Some(index)
    }

    pub fn remaining(&self) -> usize {
        self.entries.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.entries.len()
    }
}

/// Double ended ready queue with removal from the middle.
///
/// Queues stay small (at most one entry per process), so removal
/// is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyDeque {
    queue: VecDeque<usize>,
}

impl ReadyDeque {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_front(&mut self, index: usize) {
        self.queue.push_front(index);
    }

    pub fn push_back(&mut self, index: usize) {
        self.queue.push_back(index);
    }

    pub fn front(&self) -> Option<usize> {
        self.queue.front().copied()
    }

    pub fn back(&self) -> Option<usize> {
        self.queue.back().copied()
    }

    /// Removes the first occurrence of `index`, returns whether it was queued.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.queue.iter().position(|&queued| queued == index) {
            Some(position) => {
                self.queue.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
