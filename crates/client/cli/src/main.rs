//! Terminal client entry point.
mod level;
mod term;

use std::time::Duration;

use anyhow::Result;
use scavenge_core::GameConfig;
use scavenge_runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Frame period of the cooperative schedule.
const TICK: Duration = Duration::from_millis(100);
/// Extra frames after each command, enough to play out the hit flash and
/// the delayed exit reload.
const SETTLE_TICKS: u32 = 12;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let game_config = GameConfig::default();
    let input = term::QueuedInput::new();
    let reload = term::ReloadFlag::new();
    let mut runtime = Runtime::builder(level::build(&game_config))
        .with_game_config(game_config.clone())
        .with_input(input.clone())
        .with_hud(term::ConsoleHud)
        .with_audio(term::LoggedAudio)
        .with_vfx(term::LoggedVfx)
        .with_scene(reload.clone())
        .with_game_over(term::ConsoleGameOver)
        .build()?;

    println!("Reach the exit (>) before your food runs out.");
    println!("Move with w/a/s/d, quit with q.");

    let mut clock = Duration::ZERO;
    loop {
        term::render(runtime.state(), runtime.day());
        let Some(intent) = term::read_command()? else {
            break;
        };
        input.push(intent);

        // One frame for the player phase, one for the world phase, then
        // enough frames to play out any flash or pending reload.
        for _ in 0..2 + SETTLE_TICKS {
            clock += TICK;
            runtime.tick(clock)?;
        }

        if reload.take() {
            input.clear();
            runtime.install_level(level::build(&game_config))?;
        }
        if runtime.is_run_over() {
            break;
        }
    }
    Ok(())
}
