//! Reflow profile (stage table) types
//!
//! A profile is an ordered list of stages; order is the progression
//! order. Values are configuration supplied by the caller - the state
//! machine never hard-codes them.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum stages per profile
pub const MAX_STAGES: usize = 8;

/// Maximum stage name length
pub const MAX_STAGE_NAME_LEN: usize = 16;

/// Errors detected while validating a profile
///
/// Validation runs once at run start; a run with an invalid profile is
/// rejected before any tick executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Profile contains no stages
    EmptyProfile,
    /// Profile has more stages than the table can hold
    TooManyStages,
    /// Stage duty cycle has zero length
    ZeroDutyCycle {
        /// Offending stage index
        stage: usize,
    },
    /// Stage ON ticks exceed the duty cycle length
    DutyOnExceedsCycle {
        /// Offending stage index
        stage: usize,
    },
    /// Stage time limit is negative
    NegativeTimeLimit {
        /// Offending stage index
        stage: usize,
    },
    /// Scheduler tick period is zero or negative
    InvalidTickPeriod,
}

/// One stage of a reflow profile
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stage {
    /// Display name
    pub name: String<MAX_STAGE_NAME_LEN>,
    /// Approval threshold for the external temperature (°C)
    pub threshold_c: f32,
    /// Escape-valve time limit in seconds (0 = unbounded)
    pub time_limit_s: f32,
    /// Duty cycle length in ticks
    pub duty_cycle_ticks: u16,
    /// ON ticks at the head of each duty cycle
    pub duty_on_ticks: u16,
    /// Allow a falling temperature trend to satisfy approval
    pub dissipation_detect: bool,
}

impl Stage {
    /// Create a stage; names longer than the label capacity are dropped
    pub fn new(
        name: &str,
        threshold_c: f32,
        time_limit_s: f32,
        duty_cycle_ticks: u16,
        duty_on_ticks: u16,
        dissipation_detect: bool,
    ) -> Self {
        let mut label = String::new();
        let _ = label.push_str(name);
        Self {
            name: label,
            threshold_c,
            time_limit_s,
            duty_cycle_ticks,
            duty_on_ticks,
            dissipation_detect,
        }
    }

    /// Whether this stage has a time limit
    pub fn is_time_bounded(&self) -> bool {
        self.time_limit_s > 0.0
    }
}

/// Ordered stage table
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Profile {
    stages: Vec<Stage, MAX_STAGES>,
}

impl Profile {
    /// Create an empty profile
    pub const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Build a profile from a slice of stages
    pub fn from_stages(stages: &[Stage]) -> Result<Self, ConfigError> {
        let mut profile = Self::new();
        for stage in stages {
            profile.push_stage(stage.clone())?;
        }
        Ok(profile)
    }

    /// Append a stage to the progression order
    pub fn push_stage(&mut self, stage: Stage) -> Result<(), ConfigError> {
        self.stages
            .push(stage)
            .map_err(|_| ConfigError::TooManyStages)
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the profile has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage at a given progression index
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// All stages in progression order
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Check the per-stage invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::EmptyProfile);
        }
        for (index, stage) in self.stages.iter().enumerate() {
            if stage.duty_cycle_ticks == 0 {
                return Err(ConfigError::ZeroDutyCycle { stage: index });
            }
            if stage.duty_on_ticks > stage.duty_cycle_ticks {
                return Err(ConfigError::DutyOnExceedsCycle { stage: index });
            }
            if stage.time_limit_s < 0.0 {
                return Err(ConfigError::NegativeTimeLimit { stage: index });
            }
        }
        Ok(())
    }

    /// Reference four-phase profile for leaded solder paste
    ///
    /// Preheat runs at full duty to a low threshold; flux activation
    /// holds a partial duty with a bounded time limit as an escape
    /// valve; main heat runs full duty to the peak threshold; residual
    /// heat coasts at zero duty with dissipation detection enabled so a
    /// falling trend can satisfy approval below threshold.
    pub fn reference_leaded() -> Self {
        let mut profile = Self::new();
        let _ = profile.push_stage(Stage::new("preheat", 120.0, 0.0, 10, 10, false));
        let _ = profile.push_stage(Stage::new("flux-activation", 170.0, 80.0, 3, 1, false));
        let _ = profile.push_stage(Stage::new("main-heat", 225.0, 0.0, 10, 10, false));
        let _ = profile.push_stage(Stage::new("residual-heat", 240.0, 0.0, 10, 0, true));
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_profile_is_valid() {
        let profile = Profile::reference_leaded();
        assert_eq!(profile.len(), 4);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_empty_profile_rejected() {
        assert_eq!(Profile::new().validate(), Err(ConfigError::EmptyProfile));
    }

    #[test]
    fn test_duty_on_exceeding_cycle_rejected() {
        let profile =
            Profile::from_stages(&[Stage::new("bad", 100.0, 0.0, 3, 4, false)]).unwrap();
        assert_eq!(
            profile.validate(),
            Err(ConfigError::DutyOnExceedsCycle { stage: 0 })
        );
    }

    #[test]
    fn test_zero_duty_cycle_rejected() {
        let profile = Profile::from_stages(&[
            Stage::new("ok", 100.0, 0.0, 10, 10, false),
            Stage::new("bad", 150.0, 0.0, 0, 0, false),
        ])
        .unwrap();
        assert_eq!(profile.validate(), Err(ConfigError::ZeroDutyCycle { stage: 1 }));
    }

    #[test]
    fn test_negative_time_limit_rejected() {
        let profile =
            Profile::from_stages(&[Stage::new("bad", 100.0, -1.0, 10, 10, false)]).unwrap();
        assert_eq!(
            profile.validate(),
            Err(ConfigError::NegativeTimeLimit { stage: 0 })
        );
    }

    #[test]
    fn test_stage_table_overflow() {
        let stage = Stage::new("s", 100.0, 0.0, 10, 10, false);
        let mut profile = Profile::new();
        for _ in 0..MAX_STAGES {
            profile.push_stage(stage.clone()).unwrap();
        }
        assert_eq!(
            profile.push_stage(stage),
            Err(ConfigError::TooManyStages)
        );
    }

    #[test]
    fn test_oversized_stage_name_dropped() {
        let stage = Stage::new("a-name-well-beyond-the-label-capacity", 1.0, 0.0, 1, 1, false);
        assert!(stage.name.is_empty());
    }
}
