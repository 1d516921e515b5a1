//! Cyclic module contract
//!
//! `joint_exec` drives its control modules from a fixed-period loop. A module
//! is initialised once against the running [`Session`], then ticked with
//! [`State::proc`] once per loop period. Everything the module needs for a
//! tick arrives in its input data, and everything it decides leaves through
//! its output data, so a tick can be replayed from a script or a bench
//! without any other collaborator.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// A module ticked by the executable's control loop.
pub trait State {
    /// Parameters and setup data consumed once by `init`.
    type InitData;
    type InitError;

    /// Per-tick inputs (sampled operator inputs, queued commands, ...).
    type InputData;
    /// Per-tick demands handed to downstream consumers.
    type OutputData;
    /// Per-tick summary, archived to the session alongside the outputs.
    type StatusReport;
    type ProcError;

    /// Prepare the module for ticking.
    ///
    /// Called once before the first `proc`. The session gives access to the
    /// session directory and epoch, for example to archive the loaded
    /// parameters.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Run a single control tick.
    ///
    /// Commands issued between two calls through a module's own API take
    /// effect no later than the next call, and their effects are reported in
    /// that call's output.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
