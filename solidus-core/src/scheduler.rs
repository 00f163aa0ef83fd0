//! Per-tick run scheduling
//!
//! [`Scheduler`] owns the decoder, the state machine, and the
//! collaborator handles, and performs exactly one sample → decode →
//! evaluate → actuate sequence per [`tick`](Scheduler::tick). The
//! fixed-period timing loop that calls it lives with the executor (the
//! firmware's reflow task); because that loop applies each tick's
//! actuator decision before awaiting the next period, ticks serialize
//! and a late bus read delays the next tick rather than overlapping it.
//!
//! Run state and the sample log are owned here exclusively; nothing
//! else mutates them.

use crate::decode::{DecodeError, FrameDecoder, TempReading, FRAME_LEN};
use crate::profile::{ConfigError, Profile};
use crate::state::{ReflowMachine, Sample};
use crate::traits::{BusError, OutputBank, SampleBus};

/// Fatal run errors
///
/// Either kind ends the run; outputs are deactivated before the error
/// is surfaced, and no retry is attempted. Callers can distinguish an
/// aborted run from normal completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunError {
    /// The sample read failed
    Bus(BusError),
    /// The raw frame could not be decoded
    Decode(DecodeError),
}

impl From<BusError> for RunError {
    fn from(err: BusError) -> Self {
        Self::Bus(err)
    }
}

impl From<DecodeError> for RunError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

/// What one tick produced
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// The decoded reading, if a run was in progress
    pub reading: Option<TempReading>,
    /// Heater decision applied to the output bank
    pub heat: bool,
    /// The run has completed
    pub finished: bool,
}

/// Tick-synchronous run scheduler
pub struct Scheduler<B, O> {
    bus: B,
    outputs: O,
    decoder: FrameDecoder,
    machine: ReflowMachine,
}

impl<B: SampleBus, O: OutputBank> Scheduler<B, O> {
    /// Create a scheduler for the given profile and tick period
    pub fn new(bus: B, outputs: O, profile: Profile, tick_period_s: f32) -> Self {
        Self {
            bus,
            outputs,
            decoder: FrameDecoder::new(),
            machine: ReflowMachine::new(profile, tick_period_s),
        }
    }

    /// Begin a new run
    ///
    /// Configuration is validated here, before any tick executes.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        self.machine.start()
    }

    /// Execute one full tick
    ///
    /// Acquires a raw sample, decodes it, feeds it to the state
    /// machine, and applies the resulting actuator decision. A bus or
    /// decode failure deactivates every output before the error is
    /// returned. When no run is in progress the bus is left untouched
    /// and the outputs stay off.
    pub fn tick(&mut self) -> Result<TickReport, RunError> {
        if !self.machine.is_running() {
            return Ok(TickReport {
                reading: None,
                heat: false,
                finished: self.machine.is_finished(),
            });
        }

        let mut frame = [0u8; FRAME_LEN];
        let len = match self.bus.read_frame(&mut frame) {
            Ok(len) => len,
            Err(err) => {
                self.outputs.set_all(false);
                return Err(err.into());
            }
        };

        let reading = match self.decoder.decode(&frame[..len.min(FRAME_LEN)]) {
            Ok(reading) => reading,
            Err(err) => {
                self.outputs.set_all(false);
                return Err(err.into());
            }
        };

        let outcome = self.machine.tick(&reading);
        self.outputs.set_all(outcome.heat);

        Ok(TickReport {
            reading: Some(reading),
            heat: outcome.heat,
            finished: outcome.finished,
        })
    }

    /// Stop the run
    ///
    /// Deactivates every output before touching any other state; safe
    /// to call from any phase, including after an error.
    pub fn stop(&mut self) {
        self.outputs.set_all(false);
        self.machine.stop();
    }

    /// Whether the last run completed normally
    pub fn is_finished(&self) -> bool {
        self.machine.is_finished()
    }

    /// Whether a run is in progress
    pub fn is_running(&self) -> bool {
        self.machine.is_running()
    }

    /// The current run's ordered sample log
    pub fn samples(&self) -> &[Sample] {
        self.machine.samples()
    }

    /// The underlying state machine
    pub fn machine(&self) -> &ReflowMachine {
        &self.machine
    }

    /// Release the collaborator handles
    pub fn into_parts(self) -> (B, O) {
        (self.bus, self.outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Stage;
    use core::cell::RefCell;
    use heapless::Vec;

    /// Records every call crossing the collaborator boundary
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Read,
        SetChannel { channel: usize, on: bool },
    }

    type CallLog = RefCell<Vec<Call, 128>>;

    struct ScriptedBus<'a> {
        /// Raw words handed out in order; `Err` simulates a bus fault
        script: Vec<Result<u32, BusError>, 32>,
        cursor: usize,
        log: &'a CallLog,
    }

    struct RecordingBank<'a> {
        channels: usize,
        log: &'a CallLog,
    }

    impl SampleBus for ScriptedBus<'_> {
        fn read_frame(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
            let _ = self.log.borrow_mut().push(Call::Read);

            let entry = self.script.get(self.cursor).copied().unwrap_or(Ok(0));
            self.cursor += 1;
            let word = entry?;
            buf[..FRAME_LEN].copy_from_slice(&word.to_be_bytes());
            Ok(FRAME_LEN)
        }
    }

    impl OutputBank for RecordingBank<'_> {
        fn channels(&self) -> usize {
            self.channels
        }

        fn set_channel(&mut self, channel: usize, on: bool) {
            let _ = self.log.borrow_mut().push(Call::SetChannel { channel, on });
        }
    }

    /// Encode a temperature in °C as a raw external-field word
    fn word_for(external_c: f32) -> u32 {
        ((external_c / 0.25) as u32) << 18
    }

    fn scheduler_with<'a>(
        script: &[Result<u32, BusError>],
        log: &'a CallLog,
        profile: Profile,
    ) -> Scheduler<ScriptedBus<'a>, RecordingBank<'a>> {
        let mut scripted = Vec::new();
        for entry in script {
            let _ = scripted.push(*entry);
        }
        let bus = ScriptedBus {
            script: scripted,
            cursor: 0,
            log,
        };
        let bank = RecordingBank { channels: 2, log };
        Scheduler::new(bus, bank, profile, 1.0)
    }

    fn full_duty_profile() -> Profile {
        Profile::from_stages(&[Stage::new("only", 120.0, 0.0, 10, 10, false)]).unwrap()
    }

    #[test]
    fn test_tick_sequence_read_then_actuate() {
        let log = CallLog::new(Vec::new());
        let mut sched = scheduler_with(&[Ok(word_for(50.0))], &log, full_duty_profile());
        sched.start().unwrap();

        let report = sched.tick().unwrap();
        assert!(report.heat);
        assert_eq!(report.reading.unwrap().external_c, 50.0);
        assert_eq!(
            &log.borrow()[..],
            [
                Call::Read,
                Call::SetChannel { channel: 0, on: true },
                Call::SetChannel { channel: 1, on: true },
            ]
        );
    }

    #[test]
    fn test_bus_error_deactivates_before_surfacing() {
        let log = CallLog::new(Vec::new());
        let mut sched = scheduler_with(
            &[Ok(word_for(50.0)), Err(BusError::Transfer)],
            &log,
            full_duty_profile(),
        );
        sched.start().unwrap();

        sched.tick().unwrap();
        let err = sched.tick().unwrap_err();
        assert_eq!(err, RunError::Bus(BusError::Transfer));

        // The failing read is followed immediately by all-off writes
        assert_eq!(
            &log.borrow()[3..],
            [
                Call::Read,
                Call::SetChannel { channel: 0, on: false },
                Call::SetChannel { channel: 1, on: false },
            ]
        );
    }

    #[test]
    fn test_short_frame_deactivates_before_surfacing() {
        let log = CallLog::new(Vec::new());

        struct ShortBus<'a> {
            log: &'a CallLog,
        }
        impl SampleBus for ShortBus<'_> {
            fn read_frame(&mut self, _buf: &mut [u8]) -> Result<usize, BusError> {
                let _ = self.log.borrow_mut().push(Call::Read);
                Ok(2)
            }
        }

        let bus = ShortBus { log: &log };
        let bank = RecordingBank {
            channels: 2,
            log: &log,
        };
        let mut sched = Scheduler::new(bus, bank, full_duty_profile(), 1.0);
        sched.start().unwrap();

        let err = sched.tick().unwrap_err();
        assert_eq!(err, RunError::Decode(DecodeError::ShortFrame { len: 2 }));
        assert_eq!(
            &log.borrow()[..],
            [
                Call::Read,
                Call::SetChannel { channel: 0, on: false },
                Call::SetChannel { channel: 1, on: false },
            ]
        );
    }

    #[test]
    fn test_stop_deactivates_first() {
        let log = CallLog::new(Vec::new());
        let mut sched = scheduler_with(&[Ok(word_for(50.0))], &log, full_duty_profile());
        sched.start().unwrap();
        sched.tick().unwrap();

        sched.stop();
        assert!(!sched.is_running());
        assert_eq!(
            &log.borrow()[3..],
            [
                Call::SetChannel { channel: 0, on: false },
                Call::SetChannel { channel: 1, on: false },
            ]
        );
    }

    #[test]
    fn test_stop_is_safe_when_idle() {
        let log = CallLog::new(Vec::new());
        let mut sched = scheduler_with(&[], &log, full_duty_profile());
        sched.stop();
        assert!(!sched.is_running());
        assert!(!sched.is_finished());
    }

    #[test]
    fn test_tick_without_run_leaves_bus_untouched() {
        let log = CallLog::new(Vec::new());
        let mut sched = scheduler_with(&[Ok(word_for(50.0))], &log, full_duty_profile());

        let report = sched.tick().unwrap();
        assert_eq!(report.reading, None);
        assert!(!report.heat);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_run_to_completion() {
        let log = CallLog::new(Vec::new());
        let script = [
            Ok(word_for(125.0)),
            Ok(word_for(126.0)),
            Ok(word_for(127.0)),
        ];
        let mut sched = scheduler_with(&script, &log, full_duty_profile());
        sched.start().unwrap();

        sched.tick().unwrap();
        sched.tick().unwrap();
        let report = sched.tick().unwrap();

        assert!(report.finished);
        assert!(!report.heat);
        assert!(sched.is_finished());
        assert_eq!(sched.samples().len(), 3);

        // The finishing tick drove every channel off
        {
            let calls = log.borrow();
            assert_eq!(
                &calls[calls.len() - 2..],
                [
                    Call::SetChannel { channel: 0, on: false },
                    Call::SetChannel { channel: 1, on: false },
                ]
            );
        }

        // Further ticks are no-ops
        let idle = sched.tick().unwrap();
        assert!(idle.finished);
        assert_eq!(idle.reading, None);
    }

    #[test]
    fn test_config_rejected_before_first_tick() {
        let log = CallLog::new(Vec::new());
        let bad = Profile::from_stages(&[Stage::new("bad", 100.0, 0.0, 3, 4, false)]).unwrap();
        let mut sched = scheduler_with(&[Ok(word_for(50.0))], &log, bad);

        assert_eq!(
            sched.start(),
            Err(ConfigError::DutyOnExceedsCycle { stage: 0 })
        );
        assert!(log.borrow().is_empty());
    }
}
