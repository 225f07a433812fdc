//! Error and result types shared by every panel component.

/// Errors raised while bringing up or running the panel.
///
/// The LED matrix never fails: its PIO channel has no way to report errors.
#[derive(Debug, derive_more::Display, derive_more::Error, defmt::Format)]
pub enum Error {
    /// An embassy task could not be spawned (the task pool is already in use).
    #[cfg(not(feature = "host"))]
    #[display("failed to spawn task: {_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// The joystick ADC conversion failed.
    #[display("joystick ADC read failed")]
    Adc,

    /// The status display rejected a draw or a transfer on its I2C bus.
    #[display("status display bus error")]
    DisplayBus,
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
