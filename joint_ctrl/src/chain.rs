//! Actuator chain and its discovery from a node hierarchy

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::Path;
use thiserror::Error;

// Internal
use crate::actuator::{Actuator, FrictionCoefficients};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A node in the hierarchy the chain is discovered from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,

    /// True if the node carries an actuator.
    #[serde(default)]
    pub actuator: bool,

    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

/// Values every actuator is initialised with when the chain is built.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainDefaults {
    pub friction: FrictionCoefficients,

    /// Units: newtons (or newton-meters for revolute joints)
    pub force_limit: f64,
}

/// The fixed, ordered set of actuators discovered at startup.
#[derive(Debug, Clone, Default)]
pub struct ActuatorChain {
    actuators: Vec<Actuator>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while loading a hierarchy file.
#[derive(Debug, Error)]
pub enum HierarchyLoadError {
    #[error("Cannot load the hierarchy file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot parse the hierarchy file: {0}")]
    DeserialiseError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ActuatorChain {
    /// Discover all actuators below (and including) `root` in document order.
    ///
    /// A hierarchy without any actuators produces an empty chain, which is a
    /// valid state for every other operation.
    pub fn build(root: &HierarchyNode, defaults: &ChainDefaults) -> Self {
        let mut actuators = Vec::new();
        let mut stack = vec![root];

        // Pre-order walk, children pushed in reverse so they pop in order
        while let Some(node) = stack.pop() {
            if node.actuator {
                debug!("Discovered actuator {:?}", node.name);
                actuators.push(Actuator::new(
                    node.name.clone(),
                    defaults.friction,
                    defaults.force_limit,
                ));
            }
            stack.extend(node.children.iter().rev());
        }

        if actuators.is_empty() {
            warn!("No actuators found below {:?}, chain is empty", root.name);
        } else {
            info!("Built actuator chain of {} actuators", actuators.len());
        }

        ActuatorChain { actuators }
    }

    pub fn from_actuators(actuators: Vec<Actuator>) -> Self {
        ActuatorChain { actuators }
    }

    pub fn len(&self) -> usize {
        self.actuators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actuators.is_empty()
    }

    /// Get the actuator at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Actuator> {
        self.actuators.get(index)
    }

    /// Get the actuator at `index` mutably, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Actuator> {
        self.actuators.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actuator> {
        self.actuators.iter()
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a JSON hierarchy description from the given path.
pub fn load_hierarchy<P: AsRef<Path>>(path: P) -> Result<HierarchyNode, HierarchyLoadError> {
    let hierarchy_str = read_to_string(path).map_err(HierarchyLoadError::FileLoadError)?;

    serde_json::from_str(&hierarchy_str).map_err(HierarchyLoadError::DeserialiseError)
}
