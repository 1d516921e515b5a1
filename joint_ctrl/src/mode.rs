//! Lazy propagation of the control mode and its tuning into actuator drives

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::{Deserialize, Serialize};

use crate::actuator::{Actuator, ControlMode};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive tuning written when an actuator's control mode is (re)synced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveTuning {
    pub stiffness: f64,
    pub damping: f64,
}

/// Pushes the target control mode into actuators whose mode differs from it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlModeApplier {
    pub target: ControlMode,
    pub tuning: DriveTuning,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControlModeApplier {
    pub fn new(target: ControlMode, tuning: DriveTuning) -> Self {
        ControlModeApplier { target, tuning }
    }

    /// Sync the actuator's drive to the target mode.
    ///
    /// Returns `true` if the drive was written, `false` if the actuator was
    /// already in the target mode and nothing was touched. The force limit is
    /// never modified.
    pub fn sync(&self, actuator: &mut Actuator) -> bool {
        if actuator.control_mode == Some(self.target) {
            return false;
        }

        actuator.control_mode = Some(self.target);

        match self.target {
            ControlMode::PositionControl => {
                actuator.drive.stiffness = self.tuning.stiffness;
                actuator.drive.damping = self.tuning.damping;
            }
        }

        debug!(
            "Synced {:?} to {:?} (stiffness {}, damping {})",
            actuator.name, self.target, actuator.drive.stiffness, actuator.drive.damping
        );

        true
    }
}
