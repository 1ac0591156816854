//! Lane Runner entry point
//!
//! Runs a headless session at the fixed tick rate. Rendering, audio and
//! keyboard input live in the host shell; here the autopilot (or nobody)
//! supplies input and lifecycle events go to the log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lane_runner::sim::{GameEvent, GamePhase, GameState, TickInput};
use lane_runner::{Autopilot, FixedTimestep, HudReadout, Tuning};

#[derive(Debug, Parser)]
#[command(name = "lane-runner", about = "Headless lane runner simulation")]
struct Args {
    /// RNG seed for the run
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = 60 * 120)]
    ticks: u64,

    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Let the demo bot steer
    #[arg(long)]
    autopilot: bool,

    /// Print the final HUD and snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let ticks_per_second = tuning.ticks_per_second;

    log::info!("Lane Runner (headless) starting, seed {:#x}", args.seed);

    let mut state = GameState::with_tuning(args.seed, tuning).context("invalid tuning")?;
    let mut timestep = FixedTimestep::new(ticks_per_second);
    let pilot = args.autopilot.then(Autopilot::default);

    let mut input = TickInput {
        start: true,
        ..Default::default()
    };
    let frame_dt = timestep.dt();

    while state.time_ticks < args.ticks && state.phase != GamePhase::GameOver {
        if let Some(pilot) = &pilot {
            let steer = pilot.decide(&state);
            input.move_left |= steer.move_left;
            input.move_right |= steer.move_right;
        }
        timestep.run_frame(&mut state, &mut input, frame_dt);

        for event in state.drain_events() {
            match event {
                GameEvent::Started
                | GameEvent::PauseEntered
                | GameEvent::PauseExited
                | GameEvent::GameOver { .. } => log::info!("lifecycle: {event:?}"),
                GameEvent::Milestone { score } => log::info!("milestone at {score}"),
                _ => log::debug!("{event:?}"),
            }
        }
        if state.time_ticks % u64::from(ticks_per_second) == 0 {
            log::debug!("{}", HudReadout::from_state(&state, ticks_per_second));
        }
    }

    let hud = HudReadout::from_state(&state, ticks_per_second);
    if args.json {
        let report = serde_json::json!({
            "seed": args.seed,
            "ticks": state.time_ticks,
            "hud": hud,
            "snapshot": state.snapshot(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
    } else {
        println!("{hud}");
        println!("phase: {:?} after {} ticks", state.phase, state.time_ticks);
    }
    Ok(())
}
