//! Hardware drivers for the Solidus reflow oven controller
//!
//! Implementations of the `solidus-core` collaborator traits over the
//! `solidus-hal` bus and pin abstractions:
//!
//! - MAX31855 thermocouple converter (SPI)
//! - Solid-state relay output bank (GPIO)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
pub mod ssr;

pub use sensor::Max31855;
pub use ssr::SsrBank;
