//! MAX31855 thermocouple-to-digital converter
//!
//! Read-only SPI peripheral: asserting chip select and clocking 32 bits
//! shifts out one complete conversion word. Interpretation of the word
//! lives in `solidus_core::decode`; this driver only moves bytes.

use solidus_core::decode::FRAME_LEN;
use solidus_core::traits::{BusError, SampleBus};
use solidus_hal::SpiBus;

/// MAX31855 on a dedicated SPI bus (hardware-managed chip select)
pub struct Max31855<S> {
    spi: S,
}

impl<S: SpiBus> Max31855<S> {
    /// Create a driver over the given bus
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    /// Release the underlying bus
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: SpiBus> SampleBus for Max31855<S> {
    fn read_frame(&mut self, buf: &mut [u8]) -> Result<usize, BusError> {
        let len = buf.len().min(FRAME_LEN);
        self.spi
            .read(&mut buf[..len])
            .map_err(|_| BusError::Transfer)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSpi {
        word: u32,
        fail: bool,
    }

    impl SpiBus for MockSpi {
        type Error = ();

        fn read(&mut self, buf: &mut [u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            let bytes = self.word.to_be_bytes();
            for (dst, src) in buf.iter_mut().zip(bytes.iter()) {
                *dst = *src;
            }
            Ok(())
        }

        fn write(&mut self, _data: &[u8]) -> Result<(), ()> {
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_reads_one_full_frame() {
        let mut sensor = Max31855::new(MockSpi {
            word: 0x1F40_4321,
            fail: false,
        });

        let mut buf = [0u8; FRAME_LEN];
        let len = sensor.read_frame(&mut buf).unwrap();
        assert_eq!(len, FRAME_LEN);
        assert_eq!(buf, [0x1F, 0x40, 0x43, 0x21]);
    }

    #[test]
    fn test_spi_failure_maps_to_bus_error() {
        let mut sensor = Max31855::new(MockSpi {
            word: 0,
            fail: true,
        });

        let mut buf = [0u8; FRAME_LEN];
        assert_eq!(sensor.read_frame(&mut buf), Err(BusError::Transfer));
    }

    #[test]
    fn test_oversized_buffer_fills_one_frame() {
        let mut sensor = Max31855::new(MockSpi {
            word: 0x1F40_4321,
            fail: false,
        });

        let mut buf = [0xAAu8; 8];
        let len = sensor.read_frame(&mut buf).unwrap();
        assert_eq!(len, FRAME_LEN);
        assert_eq!(&buf[FRAME_LEN..], [0xAA; 4]);
    }
}
