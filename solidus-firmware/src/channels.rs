//! Inter-task communication channels
//!
//! Static embassy-sync primitives shared between tasks and the main
//! entry point.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use solidus_core::decode::TempReading;
use solidus_core::scheduler::RunError;

/// Commands accepted by the reflow task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunCommand {
    /// Stop the run and deactivate all outputs
    Stop,
}

/// Terminal status reported by the reflow task
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunStatus {
    /// Profile completed via the last stage's approval
    Finished,
    /// Run ended by a fatal bus or decode error
    Aborted(RunError),
    /// Run stopped on command
    Stopped,
    /// Profile rejected before the first tick
    Rejected,
}

/// Control commands into the reflow task
pub static CONTROL: Signal<CriticalSectionRawMutex, RunCommand> = Signal::new();

/// Terminal run status out of the reflow task
pub static STATUS: Signal<CriticalSectionRawMutex, RunStatus> = Signal::new();

/// Latest temperature reading (updated once per tick)
pub static TEMP_READING: Signal<CriticalSectionRawMutex, TempReading> = Signal::new();
