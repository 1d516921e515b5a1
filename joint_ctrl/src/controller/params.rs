//! Parameters structure for the Controller

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{
    actuator::{ControlMode, FrictionCoefficients, DEFAULT_DYNAMIC_VALUE},
    chain::ChainDefaults,
    direction::{DirectionResolver, ReleaseBehaviour},
    mode::{ControlModeApplier, DriveTuning},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the joint Controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // ---- CONTROL MODE ----
    /// Mode every actuator is synced to before it is moved.
    pub control_mode: ControlMode,

    /// Drive stiffness applied in position control.
    pub stiffness: f64,

    /// Drive damping applied in position control.
    pub damping: f64,

    // ---- CHAIN CONSTRUCTION ----
    /// Drive force limit applied to every actuator when the chain is built.
    pub force_limit: f64,

    pub joint_friction: f64,

    pub angular_damping: f64,

    // ---- OPERATOR BEHAVIOUR ----
    /// Index selected at startup, wrapped into the chain.
    pub initial_index: i64,

    /// Behaviour of the selected actuator when the analog axis is released.
    pub release: ReleaseBehaviour,

    /// If true an actuator is stopped when it loses selection, otherwise it
    /// keeps its last commanded direction.
    pub stop_on_deselect: bool,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            control_mode: ControlMode::PositionControl,
            stiffness: 10_000.0,
            damping: 100.0,
            force_limit: 1000.0,
            joint_friction: DEFAULT_DYNAMIC_VALUE,
            angular_damping: DEFAULT_DYNAMIC_VALUE,
            initial_index: 1,
            release: ReleaseBehaviour::Hold,
            stop_on_deselect: false,
        }
    }
}

impl Params {
    pub fn chain_defaults(&self) -> ChainDefaults {
        ChainDefaults {
            friction: FrictionCoefficients {
                joint_friction: self.joint_friction,
                angular_damping: self.angular_damping,
            },
            force_limit: self.force_limit,
        }
    }

    pub fn applier(&self) -> ControlModeApplier {
        ControlModeApplier::new(
            self.control_mode,
            DriveTuning {
                stiffness: self.stiffness,
                damping: self.damping,
            },
        )
    }

    pub fn resolver(&self) -> DirectionResolver {
        DirectionResolver::new(self.release)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_params() {
        let p: Params = util::params::from_str(
            "
            control_mode = \"position_control\"
            stiffness = 5000.0
            damping = 50.0
            force_limit = 200.0
            initial_index = 0
            release = \"stop\"
            stop_on_deselect = true
            ",
        )
        .unwrap();

        assert_eq!(p.stiffness, 5000.0);
        assert_eq!(p.release, ReleaseBehaviour::Stop);
        assert!(p.stop_on_deselect);
        assert_eq!(p.initial_index, 0);

        // Missing keys fall back to the defaults
        assert_eq!(p.joint_friction, DEFAULT_DYNAMIC_VALUE);
        assert_eq!(p.chain_defaults().force_limit, 200.0);
        assert_eq!(p.applier().tuning.damping, 50.0);
    }

    #[test]
    fn test_empty_params_are_default() {
        let p: Params = util::params::from_str("").unwrap();
        assert_eq!(p, Params::default());
    }
}
