//! Reflow run task
//!
//! Drives the fixed-period tick loop. Each iteration performs one full
//! sample → decide → actuate sequence through the core scheduler and
//! then waits for the next tick edge, so ticks never overlap; a late
//! bus read simply delays the next tick.

use defmt::*;
use embassy_time::{Duration, Ticker};

use solidus_core::scheduler::Scheduler;
use solidus_drivers::{Max31855, SsrBank};

use crate::channels::{RunCommand, RunStatus, CONTROL, STATUS, TEMP_READING};
use crate::hw::{SsrPin, ThermocoupleSpi, SSR_CHANNELS};

/// Tick period in milliseconds
pub const TICK_PERIOD_MS: u64 = 1000;

/// The scheduler as wired on the reference board
pub type OvenScheduler = Scheduler<Max31855<ThermocoupleSpi>, SsrBank<SsrPin, SSR_CHANNELS>>;

/// Reflow task - runs one profile to completion, error, or stop
#[embassy_executor::task]
pub async fn reflow_task(mut scheduler: OvenScheduler) {
    info!("Reflow task started");

    if let Err(err) = scheduler.start() {
        error!("Profile rejected: {}", err);
        STATUS.signal(RunStatus::Rejected);
        return;
    }

    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));

    loop {
        ticker.next().await;

        // Stop command checked before each tick; outputs are
        // deactivated before anything else is released.
        if let Some(RunCommand::Stop) = CONTROL.try_take() {
            scheduler.stop();
            info!("Run stopped on command");
            STATUS.signal(RunStatus::Stopped);
            return;
        }

        match scheduler.tick() {
            Ok(report) => {
                if let Some(reading) = report.reading {
                    info!(
                        "t={=f32}s phase={} ext={=f32}C int={=f32}C heat={=bool}",
                        scheduler.machine().elapsed_s(),
                        scheduler.machine().phase(),
                        reading.external_c,
                        reading.internal_c,
                        report.heat,
                    );
                    TEMP_READING.signal(reading);
                }

                if report.finished {
                    info!(
                        "Profile complete, {} samples logged",
                        scheduler.samples().len()
                    );
                    STATUS.signal(RunStatus::Finished);
                    return;
                }
            }
            Err(err) => {
                // Outputs are already off; the scheduler deactivates
                // them before surfacing the error.
                error!("Run aborted: {}", err);
                STATUS.signal(RunStatus::Aborted(err));
                return;
            }
        }
    }
}
