//! Core engine-facing contracts.
//!
//! This module defines the interface between the frame driver and the
//! simulation it drives, plus the startup error taxonomy shared by every host.

mod error;
mod simulation;

pub use error::StartupError;
pub use simulation::{Simulation, SimulationHandle};
