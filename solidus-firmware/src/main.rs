//! Solidus - Reflow Soldering Oven Controller Firmware
//!
//! Main firmware binary for the RP2040-based reflow oven control
//! board: a MAX31855 thermocouple converter on SPI0 and two SSR
//! channels on GPIO driving the heating elements.
//!
//! Named after the solidus line of a phase diagram - the temperature
//! boundary below which an alloy is fully solid.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use {defmt_rtt as _, panic_probe as _};

use solidus_core::profile::Profile;
use solidus_core::scheduler::Scheduler;
use solidus_drivers::{Max31855, SsrBank};

use crate::channels::{RunStatus, STATUS};
use crate::hw::{SsrPin, ThermocoupleSpi};
use crate::tasks::reflow_task;

mod channels;
mod hw;
mod tasks;

/// MAX31855 SPI clock rate
const SPI_FREQUENCY_HZ: u32 = 5_000_000;

/// Scheduler tick period as seen by the control core
const TICK_PERIOD_S: f32 = tasks::reflow::TICK_PERIOD_MS as f32 / 1000.0;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Solidus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Thermocouple converter on SPI0 (read-only device, manual CS)
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_rxonly(p.SPI0, p.PIN_18, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let sensor = Max31855::new(ThermocoupleSpi::new(spi, cs));

    // SSR channels, driven off at bring-up
    let ssrs = SsrBank::new([
        SsrPin::new(Output::new(p.PIN_3, Level::Low)),
        SsrPin::new(Output::new(p.PIN_5, Level::Low)),
    ]);

    let profile = Profile::reference_leaded();
    info!("Profile loaded: {} stages", profile.len());

    let scheduler = Scheduler::new(sensor, ssrs, profile, TICK_PERIOD_S);
    unwrap!(spawner.spawn(reflow_task(scheduler)));

    match STATUS.wait().await {
        RunStatus::Finished => info!("Run finished"),
        RunStatus::Stopped => info!("Run stopped"),
        RunStatus::Rejected => error!("Run rejected"),
        RunStatus::Aborted(err) => error!("Run aborted: {}", err),
    }
}
