//! Actuator data model
//!
//! An actuator is one controllable joint of the chain. It holds no behaviour
//! of its own beyond a few explicit commands, the rest of the crate writes
//! into it and the drive executor reads from it every tick.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default joint friction and angular damping applied to newly discovered
/// actuators.
pub const DEFAULT_DYNAMIC_VALUE: f64 = 10.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Strategy used to drive an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    PositionControl,
}

impl Default for ControlMode {
    fn default() -> Self {
        ControlMode::PositionControl
    }
}

/// Commanded motion intent of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    None,
    Positive,
    Negative,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::None
    }
}

impl Direction {
    /// The sign of the motion, `+1`, `-1` or `0` when not moving.
    pub fn sign(&self) -> i8 {
        match self {
            Direction::None => 0,
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    /// Whether this direction commands any motion.
    pub fn is_moving(&self) -> bool {
        *self != Direction::None
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tuning values of an actuator's physical drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveLimits {
    pub stiffness: f64,
    pub damping: f64,

    /// Maximum force the drive may apply. Set once when the chain is built.
    pub force_limit: f64,
}

/// Friction applied to an actuator when the chain is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionCoefficients {
    pub joint_friction: f64,
    pub angular_damping: f64,
}

impl Default for FrictionCoefficients {
    fn default() -> Self {
        FrictionCoefficients {
            joint_friction: DEFAULT_DYNAMIC_VALUE,
            angular_damping: DEFAULT_DYNAMIC_VALUE,
        }
    }
}

/// A single controllable joint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Actuator {
    /// Name of the node the actuator was discovered on.
    pub name: String,

    /// Mode the drive is currently configured for, or `None` if the drive
    /// has never been configured.
    pub control_mode: Option<ControlMode>,

    /// Current commanded motion. Retained when the actuator loses selection.
    pub direction: Direction,

    pub drive: DriveLimits,

    pub friction: FrictionCoefficients,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Actuator {
    /// Create a new unconfigured actuator which is not moving.
    pub fn new<S: Into<String>>(
        name: S,
        friction: FrictionCoefficients,
        force_limit: f64,
    ) -> Self {
        Actuator {
            name: name.into(),
            control_mode: None,
            direction: Direction::None,
            drive: DriveLimits {
                force_limit,
                ..Default::default()
            },
            friction,
        }
    }

    pub fn move_positive(&mut self) {
        self.direction = Direction::Positive;
    }

    pub fn move_negative(&mut self) {
        self.direction = Direction::Negative;
    }

    pub fn stop(&mut self) {
        self.direction = Direction::None;
    }
}
