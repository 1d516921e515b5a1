//! # Joint control library.
//!
//! Lets an operator cycle through the joints of an articulated actuator chain,
//! command the selected joint to rotate in a direction and keep every joint's
//! drive tuned for the configured control mode.
//!
//! The library only sets intent. Physics, rendering and input polling are
//! external: the chain's actuators are the write surface a drive executor
//! reads, focus changes are handed to a `focus::FocusSink`, and operator input
//! arrives as `controller::InputData` once per tick.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Actuator data model - control mode, direction and drive tuning of a single joint
pub mod actuator;

/// Actuator chain - the ordered set of actuators discovered at startup
pub mod chain;

/// Controller - per tick orchestration of selection, mode sync and direction
pub mod controller;

/// Selection cursor - wrap-around index of the selected actuator
pub mod cursor;

/// Direction resolver - maps the analog axis to a motion direction
pub mod direction;

/// Focus notifications - highlight changes for the selected actuator
pub mod focus;

/// Control mode applier - lazy drive tuning on mode change
pub mod mode;
