//! Implementations for the Controller state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::{ControllerError, JogCmd, Params};
use crate::{
    actuator::{Actuator, Direction},
    chain::{self, ActuatorChain},
    cursor::SelectionCursor,
    direction::DirectionResolver,
    focus::FocusChange,
    mode::ControlModeApplier,
};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Joint controller state
#[derive(Default)]
pub struct Controller {
    pub(crate) params: Params,

    chain: ActuatorChain,

    cursor: SelectionCursor,

    applier: ControlModeApplier,

    resolver: DirectionResolver,

    /// Held position of the analog axis.
    axis: f64,

    /// True if an axis reading arrived since the last direction update.
    axis_fresh: bool,

    /// Index which held focus when focus changes were last handed out.
    focus_origin: Option<usize>,

    /// Human readable name of the selected actuator.
    selected_joint: String,

    /// Net focus change not yet handed out by `proc`, at most one `Clear`
    /// followed by one `Set`.
    pending_focus: Vec<FocusChange>,

    report: StatusReport,
}

/// Files the Controller is initialised from, relative to the params
/// directory.
#[derive(Debug, Clone)]
pub struct InitData {
    pub params_file: String,
    pub hierarchy_file: String,
}

/// Input data to the Controller for one tick.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    /// Discrete "select next" edge.
    pub select_next: bool,

    /// Discrete "select previous" edge, takes priority over `select_next`.
    pub select_previous: bool,

    /// New analog axis reading, or `None` to keep the held value.
    pub axis: Option<f64>,

    /// Commands received since the last tick, executed in order before the
    /// edges above.
    pub cmds: Vec<JogCmd>,
}

/// Output of the Controller for one tick.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputData {
    /// Focus changes for the highlight sink, in the order they must be
    /// applied.
    pub focus: Vec<FocusChange>,

    pub dems: DriveDems,
}

/// Snapshot of the drive write surface of every actuator.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DriveDems {
    pub selected: Option<usize>,
    pub actuators: Vec<Actuator>,
}

/// Whether the Controller has any actuator to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerState {
    /// No actuators were discovered, every operation is a no-op.
    Idle,

    /// At least one actuator exists and exactly one is selected.
    Active,
}

impl Default for ControllerState {
    fn default() -> Self {
        ControllerState::Idle
    }
}

/// Status report for Controller processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    pub state: ControllerState,

    pub selected: Option<usize>,

    /// The selected actuator's direction after this tick.
    pub direction: Direction,

    /// True if the selection changed since the previous tick.
    pub selection_changed: bool,

    /// Number of drive writes performed by control mode syncs.
    pub num_mode_syncs: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for Controller {
    type InitData = InitData;
    type InitError = ControllerError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the Controller.
    ///
    /// Loads the parameters and discovers the actuator chain from the
    /// hierarchy file.
    fn init(&mut self, init_data: Self::InitData, _session: &Session) -> Result<(), Self::InitError> {
        let params: Params = params::load(&init_data.params_file)?;

        let hierarchy_path = params::params_path(&init_data.hierarchy_file)?;
        let root = chain::load_hierarchy(hierarchy_path)?;

        let chain = ActuatorChain::build(&root, &params.chain_defaults());

        *self = Controller::new(params, chain);

        Ok(())
    }

    /// Perform one tick of the Controller.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        for cmd in input_data.cmds.iter() {
            self.exec_cmd(cmd);
        }

        // Previous has priority over next if both fire in the same tick
        if input_data.select_previous {
            self.select_previous();
        } else if input_data.select_next {
            self.select_next();
        }

        if let Some(axis) = input_data.axis {
            self.set_axis(axis);
        }

        self.update_direction();

        let report = self.take_report();

        let output = OutputData {
            focus: std::mem::take(&mut self.pending_focus),
            dems: self.drive_dems(),
        };
        self.focus_origin = self.cursor.index();

        Ok((output, report))
    }
}

impl Controller {
    /// Create a new Controller over an already built chain.
    pub fn new(params: Params, chain: ActuatorChain) -> Self {
        let cursor = SelectionCursor::new(chain.len(), params.initial_index);

        let mut ctrl = Controller {
            applier: params.applier(),
            resolver: params.resolver(),
            params,
            chain,
            focus_origin: cursor.index(),
            cursor,
            ..Default::default()
        };
        ctrl.update_selected_joint();

        match ctrl.cursor.index() {
            Some(_) => info!("Controller active, selected {}", ctrl.selected_joint),
            None => info!("Controller idle, no actuators in the chain"),
        }

        ctrl
    }

    /// Execute a single operator command.
    pub fn exec_cmd(&mut self, cmd: &JogCmd) {
        debug!("Executing {:?}", cmd);

        match *cmd {
            JogCmd::SelectNext => {
                self.select_next();
            }
            JogCmd::SelectPrevious => {
                self.select_previous();
            }
            JogCmd::SelectIndex(i) => {
                self.set_selected_index(i);
            }
            JogCmd::MovePositive => self.move_positive(),
            JogCmd::MoveNegative => self.move_negative(),
            JogCmd::Stop => self.stop(),
            JogCmd::Axis(value) => self.set_axis(value),
        }
    }

    pub fn select_next(&mut self) -> Option<usize> {
        let index = self.cursor.select_next()?;
        self.on_selection_changed();
        Some(index)
    }

    pub fn select_previous(&mut self) -> Option<usize> {
        let index = self.cursor.select_previous()?;
        self.on_selection_changed();
        Some(index)
    }

    /// Select the actuator at `index`, wrapped into the chain.
    pub fn set_selected_index(&mut self, index: i64) -> Option<usize> {
        let index = self.cursor.set_index(index)?;
        self.on_selection_changed();
        Some(index)
    }

    pub fn move_positive(&mut self) {
        if let Some(act) = self.selected_mut() {
            act.move_positive();
        }
    }

    pub fn move_negative(&mut self) {
        if let Some(act) = self.selected_mut() {
            act.move_negative();
        }
    }

    pub fn stop(&mut self) {
        if let Some(act) = self.selected_mut() {
            act.stop();
        }
    }

    pub fn state(&self) -> ControllerState {
        match self.cursor.index() {
            Some(_) => ControllerState::Active,
            None => ControllerState::Idle,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.cursor.index()
    }

    pub fn selected(&self) -> Option<&Actuator> {
        self.chain.get(self.cursor.index()?)
    }

    pub fn chain(&self) -> &ActuatorChain {
        &self.chain
    }

    /// Name and index of the selected actuator, empty while idle.
    pub fn status_text(&self) -> &str {
        &self.selected_joint
    }

    /// Operator prompts describing the controls.
    pub fn instructions(&self) -> [String; 2] {
        [
            String::from("Press left/right arrow keys to select a robot joint."),
            format!("Press up/down arrow keys to move {}.", self.selected_joint),
        ]
    }

    /// Snapshot of every actuator's drive write surface.
    pub fn drive_dems(&self) -> DriveDems {
        DriveDems {
            selected: self.cursor.index(),
            actuators: self.chain.iter().cloned().collect(),
        }
    }

    /// Record a new reading of the analog axis.
    fn set_axis(&mut self, value: f64) {
        self.axis = value;
        self.axis_fresh = true;
    }

    fn selected_mut(&mut self) -> Option<&mut Actuator> {
        let index = self.cursor.index()?;
        self.chain.get_mut(index)
    }

    /// Sync the selected actuator's control mode then resolve the held axis
    /// into its direction.
    ///
    /// A held zero axis is not re-applied, only a zero reading arriving this
    /// tick releases the actuator. Explicit move commands therefore survive
    /// while the axis is idle.
    fn update_direction(&mut self) {
        let axis_fresh = std::mem::replace(&mut self.axis_fresh, false);

        let index = match self.cursor.index() {
            Some(i) => i,
            None => return,
        };
        let act = match self.chain.get_mut(index) {
            Some(a) => a,
            None => return,
        };

        if self.applier.sync(act) {
            self.report.num_mode_syncs += 1;
        }

        if axis_fresh || DirectionResolver::resolve(self.axis).is_moving() {
            self.resolver.apply(act, self.axis);
        }
    }

    /// Move focus and status to the new selection.
    fn on_selection_changed(&mut self) {
        let index = match self.cursor.index() {
            Some(i) => i,
            None => return,
        };

        if let Some(previous) = self.cursor.previous_index() {
            if previous != index && self.params.stop_on_deselect {
                if let Some(act) = self.chain.get_mut(previous) {
                    trace!("Stopping deselected actuator {:?}", act.name);
                    act.stop();
                }
            }
        }

        // Only the net change since focus was last handed out is kept
        self.pending_focus.clear();
        if let Some(origin) = self.focus_origin {
            if origin != index {
                self.pending_focus.push(FocusChange::Clear(origin));
            }
        }
        self.pending_focus.push(FocusChange::Set(index));

        self.update_selected_joint();
        self.report.selection_changed = true;

        info!("Selected {}", self.selected_joint);
    }

    fn update_selected_joint(&mut self) {
        self.selected_joint = match self.cursor.index() {
            Some(i) => match self.chain.get(i) {
                Some(act) => format!("{} ({})", act.name, i),
                None => String::new(),
            },
            None => String::new(),
        };
    }

    /// Finalise the report for this tick and reset it for the next.
    fn take_report(&mut self) -> StatusReport {
        let mut report = std::mem::take(&mut self.report);

        report.state = self.state();
        report.selected = self.cursor.index();
        report.direction = self
            .selected()
            .map(|a| a.direction)
            .unwrap_or_default();

        report
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        actuator::{ControlMode, FrictionCoefficients},
        direction::ReleaseBehaviour,
    };

    fn chain_of(n: usize) -> ActuatorChain {
        ActuatorChain::from_actuators(
            (0..n)
                .map(|i| Actuator::new(format!("link_{}", i), FrictionCoefficients::default(), 1000.0))
                .collect(),
        )
    }

    fn tick(ctrl: &mut Controller, input: InputData) -> (OutputData, StatusReport) {
        match ctrl.proc(&input) {
            Ok(r) => r,
            Err(e) => match e {},
        }
    }

    fn directions(ctrl: &Controller) -> Vec<Direction> {
        ctrl.chain().iter().map(|a| a.direction).collect()
    }

    #[test]
    fn test_navigation_scenario() {
        let mut ctrl = Controller::new(Params::default(), chain_of(3));

        assert_eq!(ctrl.selected_index(), Some(1));
        assert_eq!(ctrl.select_next(), Some(2));
        assert_eq!(ctrl.select_next(), Some(0));
        assert_eq!(ctrl.select_previous(), Some(2));
        assert_eq!(ctrl.status_text(), "link_2 (2)");
    }

    #[test]
    fn test_previous_has_priority() {
        let mut ctrl = Controller::new(Params::default(), chain_of(3));

        let (_, report) = tick(
            &mut ctrl,
            InputData {
                select_next: true,
                select_previous: true,
                ..Default::default()
            },
        );

        assert_eq!(report.selected, Some(0));
        assert!(report.selection_changed);
    }

    #[test]
    fn test_focus_changes() {
        let mut ctrl = Controller::new(Params::default(), chain_of(3));

        let (out, _) = tick(
            &mut ctrl,
            InputData {
                select_next: true,
                ..Default::default()
            },
        );
        assert_eq!(out.focus, vec![FocusChange::Clear(1), FocusChange::Set(2)]);

        // No navigation, no focus changes
        let (out, report) = tick(&mut ctrl, InputData::default());
        assert!(out.focus.is_empty());
        assert!(!report.selection_changed);

        // Changes made between ticks are handed out by the next tick
        ctrl.set_selected_index(-3);
        let (out, _) = tick(&mut ctrl, InputData::default());
        assert_eq!(out.focus, vec![FocusChange::Clear(2), FocusChange::Set(0)]);
    }

    #[test]
    fn test_single_actuator_focus() {
        let mut ctrl = Controller::new(Params::default(), chain_of(1));
        assert_eq!(ctrl.selected_index(), Some(0));

        let (out, _) = tick(
            &mut ctrl,
            InputData {
                select_previous: true,
                ..Default::default()
            },
        );
        assert_eq!(out.focus, vec![FocusChange::Set(0)]);
    }

    #[test]
    fn test_selection_isolation() {
        let mut ctrl = Controller::new(Params::default(), chain_of(4));

        tick(
            &mut ctrl,
            InputData {
                axis: Some(0.5),
                ..Default::default()
            },
        );
        assert_eq!(
            directions(&ctrl),
            vec![Direction::None, Direction::Positive, Direction::None, Direction::None]
        );

        // Move to index 3 and drive it negative, index 1 keeps moving
        ctrl.set_selected_index(3);
        tick(
            &mut ctrl,
            InputData {
                axis: Some(-0.5),
                ..Default::default()
            },
        );
        assert_eq!(
            directions(&ctrl),
            vec![Direction::None, Direction::Positive, Direction::None, Direction::Negative]
        );
    }

    #[test]
    fn test_stop_on_deselect() {
        let params = Params {
            stop_on_deselect: true,
            ..Default::default()
        };
        let mut ctrl = Controller::new(params, chain_of(3));

        ctrl.move_negative();
        assert_eq!(directions(&ctrl)[1], Direction::Negative);

        ctrl.select_next();
        assert_eq!(directions(&ctrl)[1], Direction::None);
    }

    #[test]
    fn test_release_hold() {
        let mut ctrl = Controller::new(Params::default(), chain_of(2));

        tick(&mut ctrl, InputData { axis: Some(-1.0), ..Default::default() });
        let (_, report) = tick(&mut ctrl, InputData { axis: Some(0.0), ..Default::default() });

        assert_eq!(report.direction, Direction::Negative);
    }

    #[test]
    fn test_release_stop() {
        let params = Params {
            release: ReleaseBehaviour::Stop,
            ..Default::default()
        };
        let mut ctrl = Controller::new(params, chain_of(2));

        let (_, report) = tick(&mut ctrl, InputData { axis: Some(1.0), ..Default::default() });
        assert_eq!(report.direction, Direction::Positive);

        let (_, report) = tick(&mut ctrl, InputData { axis: Some(0.0), ..Default::default() });
        assert_eq!(report.direction, Direction::None);
    }

    #[test]
    fn test_explicit_moves_with_release_stop() {
        let params = Params {
            release: ReleaseBehaviour::Stop,
            ..Default::default()
        };
        let mut ctrl = Controller::new(params, chain_of(3));

        let (out, report) = tick(
            &mut ctrl,
            InputData {
                cmds: vec![JogCmd::MovePositive],
                ..Default::default()
            },
        );
        assert_eq!(out.dems.actuators[1].direction, Direction::Positive);
        assert_eq!(report.direction, Direction::Positive);

        // An idle axis does not undo the command on later ticks
        let (out, _) = tick(&mut ctrl, InputData::default());
        assert_eq!(out.dems.actuators[1].direction, Direction::Positive);

        ctrl.move_negative();
        let (out, _) = tick(&mut ctrl, InputData::default());
        assert_eq!(out.dems.actuators[1].direction, Direction::Negative);

        // A zero reading arriving releases it
        let (out, _) = tick(
            &mut ctrl,
            InputData {
                axis: Some(0.0),
                ..Default::default()
            },
        );
        assert_eq!(out.dems.actuators[1].direction, Direction::None);

        ctrl.move_positive();
        let (out, _) = tick(
            &mut ctrl,
            InputData {
                cmds: vec![JogCmd::Axis(0.0)],
                ..Default::default()
            },
        );
        assert_eq!(out.dems.actuators[1].direction, Direction::None);
    }

    #[test]
    fn test_focus_bounded_between_ticks() {
        let mut ctrl = Controller::new(Params::default(), chain_of(3));

        for _ in 0..10_000 {
            ctrl.select_next();
        }
        assert!(ctrl.pending_focus.len() <= 2);

        // 10_000 steps from index 1 ends on index 2
        let (out, _) = tick(&mut ctrl, InputData::default());
        assert_eq!(out.focus, vec![FocusChange::Clear(1), FocusChange::Set(2)]);

        ctrl.select_previous();
        ctrl.select_next();
        let (out, _) = tick(&mut ctrl, InputData::default());
        assert_eq!(out.focus, vec![FocusChange::Set(2)]);
    }

    #[test]
    fn test_mode_synced_once() {
        let params = Params {
            stiffness: 9.0,
            damping: 2.0,
            ..Default::default()
        };
        let mut ctrl = Controller::new(params, chain_of(2));

        let (_, report) = tick(&mut ctrl, InputData::default());
        assert_eq!(report.num_mode_syncs, 1);

        for _ in 0..10 {
            let (_, report) = tick(&mut ctrl, InputData::default());
            assert_eq!(report.num_mode_syncs, 0);
        }

        let selected = ctrl.selected().unwrap();
        assert_eq!(selected.control_mode, Some(ControlMode::PositionControl));
        assert_eq!(selected.drive.stiffness, 9.0);
        assert_eq!(selected.drive.damping, 2.0);
        assert_eq!(selected.drive.force_limit, 1000.0);

        // Navigation alone does not sync, the next tick does
        ctrl.select_next();
        assert_eq!(ctrl.selected().unwrap().control_mode, None);
        let (_, report) = tick(&mut ctrl, InputData::default());
        assert_eq!(report.num_mode_syncs, 1);
    }

    #[test]
    fn test_preconfigured_actuator_not_rewritten() {
        let mut act = Actuator::new("link_0", FrictionCoefficients::default(), 1000.0);
        act.control_mode = Some(ControlMode::PositionControl);
        act.drive.stiffness = 5.0;

        let params = Params {
            initial_index: 0,
            stiffness: 9.0,
            damping: 2.0,
            ..Default::default()
        };
        let mut ctrl = Controller::new(params, ActuatorChain::from_actuators(vec![act]));

        let (_, report) = tick(&mut ctrl, InputData::default());
        assert_eq!(report.num_mode_syncs, 0);
        assert_eq!(ctrl.selected().unwrap().drive.stiffness, 5.0);
    }

    #[test]
    fn test_scripted_cmds() {
        let mut ctrl = Controller::new(Params::default(), chain_of(3));

        let (out, report) = tick(
            &mut ctrl,
            InputData {
                cmds: vec![JogCmd::SelectIndex(0), JogCmd::MovePositive, JogCmd::SelectNext],
                ..Default::default()
            },
        );

        assert_eq!(report.selected, Some(1));
        assert_eq!(out.dems.selected, Some(1));
        assert_eq!(out.dems.actuators[0].direction, Direction::Positive);
        // Selection ended where it started, focus is only re-asserted
        assert_eq!(out.focus, vec![FocusChange::Set(1)]);

        tick(
            &mut ctrl,
            InputData {
                cmds: vec![JogCmd::Axis(-0.25)],
                ..Default::default()
            },
        );
        assert_eq!(ctrl.selected().unwrap().direction, Direction::Negative);

        ctrl.exec_cmd(&JogCmd::Stop);
        assert_eq!(ctrl.selected().unwrap().direction, Direction::None);
    }

    #[test]
    fn test_empty_chain() {
        let mut ctrl = Controller::new(Params::default(), ActuatorChain::default());
        assert_eq!(ctrl.state(), ControllerState::Idle);

        for _ in 0..5 {
            assert_eq!(ctrl.select_next(), None);
            assert_eq!(ctrl.select_previous(), None);
            assert_eq!(ctrl.set_selected_index(2), None);
            ctrl.move_positive();
            ctrl.move_negative();
            ctrl.stop();

            let (out, report) = tick(
                &mut ctrl,
                InputData {
                    select_next: true,
                    select_previous: true,
                    axis: Some(1.0),
                    cmds: vec![JogCmd::SelectNext, JogCmd::MovePositive],
                },
            );

            assert!(out.focus.is_empty());
            assert!(out.dems.actuators.is_empty());
            assert_eq!(report.state, ControllerState::Idle);
            assert_eq!(report.selected, None);
            assert_eq!(report.num_mode_syncs, 0);
            assert!(!report.selection_changed);
        }

        assert_eq!(ctrl.selected_index(), None);
        assert!(ctrl.selected().is_none());
        assert_eq!(ctrl.status_text(), "");
    }

    #[test]
    fn test_instructions() {
        let ctrl = Controller::new(Params::default(), chain_of(2));
        let [select, mv] = ctrl.instructions();

        assert_eq!(select, "Press left/right arrow keys to select a robot joint.");
        assert_eq!(mv, "Press up/down arrow keys to move link_1 (1).");
    }
}
