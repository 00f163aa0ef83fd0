//! Collaborator boundary traits
//!
//! The control core depends on these contracts; hardware-facing
//! implementations live in `solidus-drivers`, mocks live in tests.

pub mod bus;
pub mod output;

pub use bus::{BusError, SampleBus};
pub use output::OutputBank;
