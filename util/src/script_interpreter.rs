//! # Script interpreter module
//!
//! This module provides an interpreter for timed command scripts, allowing
//! commands to be replayed against the session clock.
//!
//! A script is a series of `<time_s>: <json>;` entries, for example:
//!
//! ```text
//! 0.5: "SelectNext";
//! 1.0: {"Axis": 0.8};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use conquer_once::Lazy;
use regex::{Regex, RegexBuilder};
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

/// Matches one `<time_s>: <payload>;` script entry.
///
/// The pattern is constant, so building it can only fail if the pattern itself
/// is edited into something invalid, which the tests below catch.
static SCRIPT_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
        .multi_line(true)
        .build()
        .unwrap()
});

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
struct Command<C> {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    cmd: C,
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_cmds` to acquire a list of commands that need executing.
pub struct ScriptInterpreter<C> {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Command<C>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid command at {0} s: {1}")]
    InvalidCmd(f64, serde_json::Error),
}

/// Commands which are due for execution.
#[derive(Debug, PartialEq)]
pub enum PendingCmds<C> {
    None,
    Some(Vec<C>),
    EndOfScript,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C> ScriptInterpreter<C>
where
    C: DeserializeOwned,
{
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path.display().to_string()));
        }

        let script = fs::read_to_string(&path).map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_script(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        let mut cmds = VecDeque::new();

        for cap in SCRIPT_ENTRY_RE.captures_iter(script) {
            // Both groups are mandatory in the pattern so always present
            let time_str = &cap[1];
            let payload = &cap[3];

            let exec_time_s: f64 = time_str
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // The payload of each line is JSON only
            let cmd = serde_json::from_str(payload)
                .map_err(|e| ScriptError::InvalidCmd(exec_time_s, e))?;

            cmds.push_back(Command { exec_time_s, cmd });
        }

        if cmds.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        Ok(ScriptInterpreter {
            script_path: None,
            cmds,
        })
    }
}

impl<C> ScriptInterpreter<C> {
    /// Return the commands due at the current session time.
    pub fn get_pending_cmds(&mut self) -> PendingCmds<C> {
        self.get_pending_cmds_at(get_elapsed_seconds())
    }

    /// Return the commands due at the given time.
    ///
    /// Commands are released in script order once their execution time is
    /// strictly before `current_time_s`.
    pub fn get_pending_cmds_at(&mut self, current_time_s: f64) -> PendingCmds<C> {
        // If the queue is empty the script is over
        if self.cmds.is_empty() {
            return PendingCmds::EndOfScript;
        }

        let mut cmd_vec = vec![];

        while let Some(front) = self.cmds.front() {
            if front.exec_time_s >= current_time_s {
                break;
            }
            if let Some(c) = self.cmds.pop_front() {
                cmd_vec.push(c.cmd);
            }
        }

        if cmd_vec.is_empty() {
            PendingCmds::None
        } else {
            PendingCmds::Some(cmd_vec)
        }
    }

    /// Get the path the script was loaded from, if it came from a file.
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }

    /// Get the number of commands remaining in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64,
        }
    }
}
