//! Sky Dash entry point
//!
//! Headless demo driver: runs a seeded session with a scripted zig-zag input
//! until a hazard ends it, logging the run as it goes. The graphical frontend
//! drives the same `Session` API from its frame callback instead.

use sky_dash::consts::{DEFAULT_SEED, NOMINAL_TICK_DT};
use sky_dash::sim::{InputSample, KeyAxis, Session, SessionHooks, SessionPhase};
use sky_dash::tuning::Tuning;

/// Logs boundary signals the way a frontend would route them to audio/UI
struct LoggingHooks;

impl SessionHooks for LoggingHooks {
    fn collected(&mut self) {
        log::info!("collected!");
    }

    fn hazard_hit(&mut self) {
        log::info!("hit a hazard");
    }

    fn session_ended(&mut self, final_score: u32) {
        log::info!("final score: {final_score}m");
    }
}

/// Flip lateral direction every ~0.75 s so the demo sweeps the field
fn scripted_input(tick: u64) -> InputSample {
    if (tick / 45) % 2 == 0 {
        InputSample::Key(KeyAxis::Left)
    } else {
        InputSample::Key(KeyAxis::Right)
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut session = match Session::new(seed, Tuning::default()) {
        Ok(session) => session,
        Err(err) => {
            log::error!("bad tuning: {err}");
            return;
        }
    };

    log::info!("Sky Dash demo run (seed {seed})");
    session.start();

    let mut hooks = LoggingHooks;
    // ~15 minutes of simulated time, far beyond any surviving run
    for tick in 0..54_000u64 {
        session.supply_input(scripted_input(tick));
        let snapshot = session.tick(NOMINAL_TICK_DT, &mut hooks);

        if snapshot.phase == SessionPhase::Ended {
            println!(
                "run over: {}m in {:.1}s ({} collectibles)",
                snapshot.score,
                snapshot.time_ticks as f32 * NOMINAL_TICK_DT,
                snapshot.collected
            );
            return;
        }
        if tick % 600 == 0 && tick > 0 {
            log::info!(
                "{}m, multiplier {:.1}, {} entities live",
                snapshot.score,
                snapshot.multiplier,
                snapshot.entities.len()
            );
        }
    }
    println!("demo run survived the whole window");
}
