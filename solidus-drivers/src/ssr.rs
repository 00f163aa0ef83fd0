//! Solid-state relay output bank
//!
//! Drives one or more SSR channels through GPIO pins. The heating
//! elements are wired so that all channels carry the same heat
//! decision; per-channel control exists for bring-up and testing.

use solidus_core::traits::OutputBank;
use solidus_hal::OutputPin;

/// Bank of SSR channels over push-pull GPIO pins
///
/// Channels are forced off at construction and again on release, so a
/// dropped or torn-down bank never leaves an element energized.
pub struct SsrBank<P, const N: usize> {
    pins: [P; N],
}

impl<P: OutputPin, const N: usize> SsrBank<P, N> {
    /// Take ownership of the channel pins, driving them all off
    pub fn new(pins: [P; N]) -> Self {
        let mut bank = Self { pins };
        bank.set_all(false);
        bank
    }

    /// Force every channel off and give the pins back
    pub fn release(mut self) -> [P; N] {
        self.set_all(false);
        self.pins
    }

    /// Whether a given channel is currently energized
    pub fn is_on(&self, channel: usize) -> bool {
        self.pins
            .get(channel)
            .map(|pin| pin.is_set_high())
            .unwrap_or(false)
    }
}

impl<P: OutputPin, const N: usize> OutputBank for SsrBank<P, N> {
    fn channels(&self) -> usize {
        N
    }

    fn set_channel(&mut self, channel: usize, on: bool) {
        if let Some(pin) = self.pins.get_mut(channel) {
            pin.set_state(on);
        }
    }
}
