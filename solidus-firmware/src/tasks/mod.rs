//! Embassy async tasks

pub mod reflow;

pub use reflow::{reflow_task, OvenScheduler};
