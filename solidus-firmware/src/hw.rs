//! Board glue: solidus-hal trait adapters for embassy-rp peripherals

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};

/// SSR channels on the reference board
pub const SSR_CHANNELS: usize = 2;

/// SPI bus to the MAX31855 with a software-managed chip select
///
/// The converter starts shifting its word on the falling CS edge, so
/// CS is asserted around each whole-frame transaction.
pub struct ThermocoupleSpi {
    spi: Spi<'static, SPI0, Blocking>,
    cs: Output<'static>,
}

impl ThermocoupleSpi {
    pub fn new(spi: Spi<'static, SPI0, Blocking>, cs: Output<'static>) -> Self {
        Self { spi, cs }
    }

    fn selected<R>(&mut self, op: impl FnOnce(&mut Spi<'static, SPI0, Blocking>) -> R) -> R {
        self.cs.set_low();
        let result = op(&mut self.spi);
        self.cs.set_high();
        result
    }
}

impl solidus_hal::SpiBus for ThermocoupleSpi {
    type Error = embassy_rp::spi::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.selected(|spi| spi.blocking_read(buf))
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.selected(|spi| spi.blocking_write(data))
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.selected(|spi| spi.blocking_transfer(read, write))
    }
}

/// Push-pull GPIO pin driving one SSR channel
pub struct SsrPin {
    pin: Output<'static>,
}

impl SsrPin {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl solidus_hal::OutputPin for SsrPin {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
