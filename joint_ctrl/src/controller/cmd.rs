//! Operator commands accepted by the Controller

use serde::{Deserialize, Serialize};

/// A discrete command issued to the Controller.
///
/// In scripts each command is written as JSON, for example `"SelectNext"` or
/// `{"Axis": -0.5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JogCmd {
    /// Select the next actuator in the chain, wrapping to the first.
    SelectNext,

    /// Select the previous actuator in the chain, wrapping to the last.
    SelectPrevious,

    /// Select the actuator at the given index, wrapped into the chain.
    SelectIndex(i64),

    /// Move the selected actuator in the positive direction.
    MovePositive,

    /// Move the selected actuator in the negative direction.
    MoveNegative,

    /// Stop the selected actuator.
    Stop,

    /// Set the held position of the analog axis, roughly between -1 and +1.
    Axis(f64),
}
