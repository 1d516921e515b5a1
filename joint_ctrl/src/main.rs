//! Joint control executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and the Controller
//!     - Main loop:
//!         - Acquire the operator commands due this cycle from the script
//!         - Controller processing
//!         - Hand focus changes to the focus sink
//!     - Archive the final drive demands and exit
//!
//! # Usage
//!
//! `joint_exec <script>` where `<script>` is a jog command script, for
//! example `scripts/demo.jog`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use joint_lib::{
    controller::{Controller, DriveDems, InitData, InputData, JogCmd},
    focus::{FocusSink, LogFocusSink},
};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingCmds, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.05;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    let session = Session::new("joint_exec", "sessions").wrap_err("Failed to create the session")?;

    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    info!("Joint Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD SCRIPT ----

    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    if args.len() != 2 {
        return Err(eyre!(
            "Expected exactly one argument (the jog script), found {}",
            args.len() - 1
        ));
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut script: ScriptInterpreter<JogCmd> =
        ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} commands\n",
        script.get_duration(),
        script.get_num_cmds()
    );

    // ---- INITIALISE CONTROLLER ----

    let mut controller = Controller::default();
    controller
        .init(
            InitData {
                params_file: String::from("joint_ctrl.toml"),
                hierarchy_file: String::from("arm_hierarchy.json"),
            },
            &session,
        )
        .wrap_err("Failed to initialise the Controller")?;

    for line in controller.instructions().iter() {
        info!("{}", line);
    }

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let mut num_cycles: u64 = 0;
    let mut final_dems = DriveDems::default();

    loop {
        let cycle_start_instant = Instant::now();

        // ---- INPUT ----

        let cmds = match script.get_pending_cmds() {
            PendingCmds::None => Vec::new(),
            PendingCmds::Some(cmds) => cmds,
            PendingCmds::EndOfScript => {
                info!("End of jog script reached, stopping");
                break;
            }
        };

        let input = InputData {
            cmds,
            ..Default::default()
        };

        // ---- CONTROLLER PROCESSING ----

        let (output, report) = match controller.proc(&input) {
            Ok(r) => r,
            Err(e) => match e {},
        };

        if report.selection_changed {
            for line in controller.instructions().iter() {
                info!("{}", line);
            }
        }
        if report.num_mode_syncs > 0 {
            debug!("{} control mode sync(s) this cycle", report.num_mode_syncs);
        }

        let mut sink = LogFocusSink::new(controller.chain());
        for change in output.focus.iter() {
            sink.apply(change);
        }

        final_dems = output.dems;

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
            ),
        }

        num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!("Executed {} cycles", num_cycles);

    for (i, act) in final_dems.actuators.iter().enumerate() {
        info!("    {} ({}): {:?}", act.name, i, act.direction);
    }

    session.save("joint_ctrl/final_dems.json", final_dems);
    session.exit();

    info!("End of execution");

    Ok(())
}
