//! Run-scoped temperature sample log

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum samples retained per run
///
/// At the default 1 s tick this covers a little over half an hour;
/// when the log is full the run keeps going and further samples are
/// dropped.
pub const MAX_SAMPLES: usize = 2048;

/// One temperature observation
///
/// Immutable once created; appended to the run's ordered log in strict
/// tick order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Seconds since run start
    pub time_offset_s: f32,
    /// Thermocouple temperature (°C)
    pub external_c: f32,
    /// Cold-junction temperature (°C)
    pub internal_c: f32,
}
