//! Tick-synchronous duty-cycle actuation
//!
//! Converts the active stage's duty parameters into an ON/OFF decision
//! per scheduler tick. This is a tick-granularity pulse-width pattern,
//! not hardware PWM; its frequency is bounded by the tick rate.

/// Duty-cycle tick counter
///
/// The counter is stage-local: it advances every tick and wraps after
/// `cycle_ticks - 1`, and is reset only on stage transition or explicit
/// stop. Within each cycle the output is ON for ticks
/// `0..on_ticks - 1` and OFF for the remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCycle {
    counter: u16,
}

impl DutyCycle {
    /// Create a counter at the start of a cycle
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Decide the output for the current tick and advance the counter
    pub fn tick(&mut self, cycle_ticks: u16, on_ticks: u16) -> bool {
        let on = self.counter < on_ticks;
        self.counter = if self.counter + 1 >= cycle_ticks {
            0
        } else {
            self.counter + 1
        };
        on
    }

    /// Rewind to the start of a cycle
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Current position within the cycle
    pub const fn position(&self) -> u16 {
        self.counter
    }
}
