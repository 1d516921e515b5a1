//! Focus (highlight) notifications for the selected actuator
//!
//! How focus is shown is up to the sink, the controller only reports which
//! index gained and which index lost focus.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use serde::Serialize;

use crate::chain::ActuatorChain;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A change of visual focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FocusChange {
    /// The actuator at this index has lost focus.
    Clear(usize),

    /// The actuator at this index has gained focus.
    Set(usize),
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Consumer of focus changes.
pub trait FocusSink {
    fn set_focus(&mut self, index: usize);

    fn clear_focus(&mut self, index: usize);

    fn apply(&mut self, change: &FocusChange) {
        match *change {
            FocusChange::Clear(i) => self.clear_focus(i),
            FocusChange::Set(i) => self.set_focus(i),
        }
    }
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Sink which reports focus moves through the logger.
pub struct LogFocusSink<'a> {
    chain: &'a ActuatorChain,
}

impl<'a> LogFocusSink<'a> {
    pub fn new(chain: &'a ActuatorChain) -> Self {
        LogFocusSink { chain }
    }

    fn name(&self, index: usize) -> &str {
        self.chain
            .get(index)
            .map(|a| a.name.as_str())
            .unwrap_or("<unknown>")
    }
}

impl<'a> FocusSink for LogFocusSink<'a> {
    fn set_focus(&mut self, index: usize) {
        info!("Focus set on {} ({})", self.name(index), index);
    }

    fn clear_focus(&mut self, index: usize) {
        info!("Focus cleared from {} ({})", self.name(index), index);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl FocusSink for Recorder {
        fn set_focus(&mut self, index: usize) {
            self.calls.push(format!("set {}", index));
        }

        fn clear_focus(&mut self, index: usize) {
            self.calls.push(format!("clear {}", index));
        }
    }

    #[test]
    fn test_apply_dispatch() {
        let mut sink = Recorder::default();

        for change in &[FocusChange::Clear(2), FocusChange::Set(0)] {
            sink.apply(change);
        }

        assert_eq!(sink.calls, vec!["clear 2", "set 0"]);
    }
}
