//! Raw sample acquisition boundary

/// Errors that can occur during a bus transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The bus transfer failed
    Transfer,
    /// The bus or device was not ready for a transaction
    NotReady,
}

/// Source of raw temperature sensor frames
///
/// One call performs one bus transaction. The call may block waiting on
/// the bus; it is the only suspending operation in a tick.
pub trait SampleBus {
    /// Fill `buf` with one raw frame, returning the number of bytes read
    fn read_frame(&mut self, buf: &mut [u8]) -> Result<usize, BusError>;
}
