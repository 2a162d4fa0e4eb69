//! The scheduling policies.
//!
//! Each policy lives in its own file and implements
//! [`Scheduler`](crate::Scheduler).
//!
mod fcfs;
pub use fcfs::Fcfs;

mod priority;
pub use priority::Priority;

mod aging_srtf;
pub use aging_srtf::{AgingSrtf, AGING_DECREMENT, AGING_THRESHOLD};

mod fcai;
pub use fcai::{Fcai, QUANTUM_BONUS};
