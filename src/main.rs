//! Snowfight headless demo
//!
//! Plays a scripted round at 60 Hz and logs what happens once per simulated
//! second. Run with `--help` for options.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use snowfight::consts::FRAME_DT;
use snowfight::sim::{Action, Character, Engine, GameEvent, ROSTER, character};
use snowfight::Tuning;

/// Play a scripted snowball-fight round without a window
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Character to play (Arda, Elif, Can, Ayşe)
    #[arg(short, long, default_value = "Arda", value_parser = parse_character)]
    character: &'static Character,

    /// Simulated seconds to play
    #[arg(short, long, default_value_t = 10.0, value_parser = parse_seconds)]
    seconds: f32,

    /// JSON file overriding the default tuning
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Seed for the cosmetic snowfall
    #[arg(long, default_value_t = 2024)]
    seed: u64,
}

fn parse_character(name: &str) -> Result<&'static Character, String> {
    character(name).ok_or_else(|| {
        let names: Vec<_> = ROSTER.iter().map(|c| c.name).collect();
        format!("unknown character {name:?}, expected one of {}", names.join(", "))
    })
}

fn parse_seconds(s: &str) -> Result<f32, String> {
    let secs: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if secs > 0.0 && secs.is_finite() {
        Ok(secs)
    } else {
        Err(format!("must be a positive number of seconds, got {s}"))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let seconds = args.seconds;
    let hero = args.character;

    let tuning = match &args.tuning {
        None => Tuning::default(),
        Some(path) => match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
    };

    let mut engine = Engine::with_tuning(tuning, args.seed);
    engine.set_character_profile(hero.profile);
    engine.reset();
    log::info!("Playing as {} ({})", hero.name, hero.description);

    engine.set_input(Action::Right, true);

    let frames = (seconds / FRAME_DT).round() as u32;
    let mut thrown = 0u32;
    let mut spawned = 0u32;
    for frame in 1..=frames {
        // Throw in bursts, hop every few seconds
        let t = frame as f32 * FRAME_DT;
        if (t * 2.0) as u32 % 3 == 0 {
            engine.set_input(Action::Throw, true);
        }
        engine.set_input(Action::Jump, frame % 240 == 0);

        engine.update(FRAME_DT);
        for event in engine.drain_events() {
            match event {
                GameEvent::ProjectileThrown { .. } => thrown += 1,
                GameEvent::EnemySpawned { .. } => spawned += 1,
                GameEvent::RoundEnded { score } => log::info!("Time! Score {score}"),
                GameEvent::EnemyHit { .. } | GameEvent::PlayerContact => {}
            }
        }

        if frame % 60 == 0 {
            let snap = engine.snapshot();
            let (x, y) = snap.player.map_or((0.0, 0.0), |p| (p.pos.x, p.pos.y));
            log::info!(
                "t={:>2}s score={:>3} player=({:.0}, {:.0}) enemies={} snowballs={}",
                frame / 60,
                snap.score,
                x,
                y,
                snap.enemies.len(),
                snap.projectiles.len()
            );
        }
    }

    log::info!(
        "Done: score {}, {} snowballs thrown, {} enemies spawned, {:.1}s left",
        engine.score(),
        thrown,
        spawned,
        engine.time_remaining()
    );
    ExitCode::SUCCESS
}
