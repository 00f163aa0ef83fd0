//! Board-agnostic core logic for the reflow oven controller
//!
//! This crate contains all control logic that does not depend on
//! specific hardware implementations:
//!
//! - Thermocouple frame decoding (MAX31855 wire format)
//! - Stage-progression state machine with debounced threshold detection
//! - Tick-synchronous duty-cycle actuation
//! - Reflow profile (stage table) types and validation
//! - Per-tick scheduling over collaborator traits

#![no_std]
#![deny(unsafe_code)]

pub mod decode;
pub mod duty;
pub mod profile;
pub mod scheduler;
pub mod state;
pub mod traits;

pub use decode::{DecodeError, FrameDecoder, TempReading, FRAME_LEN};
pub use duty::DutyCycle;
pub use profile::{ConfigError, Profile, Stage, MAX_STAGES};
pub use scheduler::{RunError, Scheduler, TickReport};
pub use state::{Phase, ReflowMachine, Sample, TickOutcome, APPROVALS_REQUIRED, MAX_SAMPLES};
pub use traits::{BusError, OutputBank, SampleBus};
