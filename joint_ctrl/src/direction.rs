//! Resolution of the operator's analog signal into a motion direction

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use serde::{Deserialize, Serialize};

use crate::actuator::{Actuator, Direction};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// What happens to the selected actuator's direction when the analog signal
/// is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseBehaviour {
    /// Keep the last commanded direction until explicitly stopped.
    Hold,

    /// Stop the actuator as soon as the signal is released.
    Stop,
}

impl Default for ReleaseBehaviour {
    fn default() -> Self {
        ReleaseBehaviour::Hold
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Maps the analog signal to a direction and writes it into an actuator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionResolver {
    pub release: ReleaseBehaviour,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DirectionResolver {
    pub fn new(release: ReleaseBehaviour) -> Self {
        DirectionResolver { release }
    }

    /// Resolve a signal by its sign alone, there is no deadband.
    ///
    /// NaN resolves to `Direction::None`.
    pub fn resolve(signal: f64) -> Direction {
        if signal > 0.0 {
            Direction::Positive
        } else if signal < 0.0 {
            Direction::Negative
        } else {
            Direction::None
        }
    }

    /// Resolve the signal and write it into the actuator, honouring the
    /// release behaviour for a zero signal.
    ///
    /// Returns the actuator's direction after the write.
    pub fn apply(&self, actuator: &mut Actuator, signal: f64) -> Direction {
        let direction = Self::resolve(signal);

        if direction.is_moving() || self.release == ReleaseBehaviour::Stop {
            if actuator.direction != direction {
                trace!("{:?} direction {:?} -> {:?}", actuator.name, actuator.direction, direction);
            }
            actuator.direction = direction;
        }

        actuator.direction
    }
}
