//! Joint controller module
//!
//! Orchestrates selection, control mode sync and direction resolution over the
//! actuator chain, once per tick.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use params::*;
pub use state::*;

use crate::chain::HierarchyLoadError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while initialising the Controller.
///
/// Cyclic processing itself never fails, stale or premature operator input is
/// ignored instead.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Could not load the controller parameters: {0}")]
    ParamsLoadError(#[from] util::params::LoadError),

    #[error("Could not load the actuator hierarchy: {0}")]
    HierarchyLoadError(#[from] HierarchyLoadError),
}
