//! Run state and stage-progression state machine

pub mod machine;
pub mod sample;

pub use machine::{Phase, ReflowMachine, TickOutcome, APPROVALS_REQUIRED};
pub use sample::{Sample, MAX_SAMPLES};
