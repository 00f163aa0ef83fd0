//! Stage-progression state machine
//!
//! On each tick the machine consumes one decoded temperature reading,
//! evaluates the current stage's approval condition, drives the
//! duty-cycle counter, and advances stages or finishes the run.
//!
//! Stage transitions are debounced by accumulation: a stage needs
//! [`APPROVALS_REQUIRED`] approving ticks before it hands over, and the
//! approval counter never decrements within a stage, so intervening
//! non-qualifying ticks do not restart the count. A stage with a time
//! limit transitions when the limit elapses even if the threshold is
//! never confirmed.

use heapless::Vec;

use super::sample::{Sample, MAX_SAMPLES};
use crate::decode::TempReading;
use crate::duty::DutyCycle;
use crate::profile::{ConfigError, Profile};

/// Approving ticks required before a stage transition
pub const APPROVALS_REQUIRED: u8 = 3;

/// Machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No run in progress
    Idle,
    /// Executing the stage at this progression index
    Stage(usize),
    /// Run completed via the last stage's approval
    Finished,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Heater decision for this tick
    pub heat: bool,
    /// The run completed on this tick (or earlier)
    pub finished: bool,
}

/// The reflow control core
///
/// Owns the run's mutable session state and the sample log. Constructed
/// with its configuration and passed by ownership to the scheduler;
/// there is no process-wide instance.
#[derive(Debug)]
pub struct ReflowMachine {
    profile: Profile,
    tick_period_s: f32,
    phase: Phase,
    /// Approving ticks seen in the current stage
    approvals: u8,
    /// Ticks spent in the current stage
    stage_ticks: u32,
    duty: DutyCycle,
    /// Seconds since run start; never reset mid-run
    elapsed_s: f32,
    samples: Vec<Sample, MAX_SAMPLES>,
}

impl ReflowMachine {
    /// Create a machine in the idle phase
    pub fn new(profile: Profile, tick_period_s: f32) -> Self {
        Self {
            profile,
            tick_period_s,
            phase: Phase::Idle,
            approvals: 0,
            stage_ticks: 0,
            duty: DutyCycle::new(),
            elapsed_s: 0.0,
            samples: Vec::new(),
        }
    }

    /// Begin a new run at the first stage
    ///
    /// Validates the profile and tick period; an invalid configuration
    /// is rejected before any tick executes. Clears the previous run's
    /// sample log.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        self.profile.validate()?;
        if !(self.tick_period_s > 0.0) {
            return Err(ConfigError::InvalidTickPeriod);
        }

        self.phase = Phase::Stage(0);
        self.approvals = 0;
        self.stage_ticks = 0;
        self.duty.reset();
        self.elapsed_s = 0.0;
        self.samples.clear();
        Ok(())
    }

    /// Stop the run and return to idle
    ///
    /// Safe to call from any phase. The sample log is retained for
    /// inspection until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.approvals = 0;
        self.stage_ticks = 0;
        self.duty.reset();
    }

    /// Process one temperature reading
    ///
    /// Idle and finished machines ignore the reading and keep their
    /// outputs off.
    pub fn tick(&mut self, reading: &TempReading) -> TickOutcome {
        let Phase::Stage(index) = self.phase else {
            return TickOutcome {
                heat: false,
                finished: self.phase == Phase::Finished,
            };
        };

        let _ = self.samples.push(Sample {
            time_offset_s: self.elapsed_s,
            external_c: reading.external_c,
            internal_c: reading.internal_c,
        });
        self.elapsed_s += self.tick_period_s;
        self.stage_ticks += 1;

        let Some(stage) = self.profile.stage(index) else {
            self.phase = Phase::Finished;
            return TickOutcome {
                heat: false,
                finished: true,
            };
        };

        let timer_expired = stage.is_time_bounded()
            && self.stage_ticks as f32 * self.tick_period_s > stage.time_limit_s;
        let dissipating =
            stage.dissipation_detect && matches!(reading.delta_c, Some(d) if d < 0.0);

        if reading.external_c > stage.threshold_c || dissipating {
            self.approvals = self.approvals.saturating_add(1);
        }

        let mut heat = self.duty.tick(stage.duty_cycle_ticks, stage.duty_on_ticks);
        let mut finished = false;

        if self.approvals >= APPROVALS_REQUIRED || timer_expired {
            self.approvals = 0;
            self.stage_ticks = 0;
            self.duty.reset();

            if index + 1 < self.profile.len() {
                self.phase = Phase::Stage(index + 1);
            } else {
                self.phase = Phase::Finished;
                heat = false;
                finished = true;
            }
        }

        TickOutcome { heat, finished }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a run is in progress
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Stage(_))
    }

    /// Whether the last run completed normally
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Seconds since run start
    pub fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }

    /// Approving ticks seen in the current stage
    pub fn approvals(&self) -> u8 {
        self.approvals
    }

    /// The run's sample log, in strict tick order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The configured stage table
    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}
