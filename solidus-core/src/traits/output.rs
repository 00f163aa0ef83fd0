//! Actuator output boundary

/// Bank of digital actuator channels (SSRs)
///
/// Writes are assumed to take effect before the call returns.
pub trait OutputBank {
    /// Number of channels in the bank
    fn channels(&self) -> usize;

    /// Drive a single channel
    fn set_channel(&mut self, channel: usize, on: bool);

    /// Drive every channel to the same state
    fn set_all(&mut self, on: bool) {
        for channel in 0..self.channels() {
            self.set_channel(channel, on);
        }
    }
}
