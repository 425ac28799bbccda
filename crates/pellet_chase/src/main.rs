//! Pellet Chase in the terminal
//!
//! Usage: `pellet_chase [config.toml|config.ron]`

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{error, info};
use pellet_chase::terminal::{TerminalInput, TerminalRenderer, TerminalSession};
use pellet_chase::{GameConfig, GameResult, Scene};
use scene_engine::config::Config;
use scene_engine::foundation::{logging, time::Timer};
use scene_engine::input::InputSource;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref())?;
    config.validate()?;

    // The terminal belongs to the game while it runs, so logs go to a file.
    let log_file = File::create(&config.runtime.log_file)?;
    logging::init_with_sink(Box::new(log_file));
    info!("Starting Pellet Chase");
    match &config_path {
        Some(path) => info!("Configuration: {}", path.display()),
        None => info!("Configuration: built-in defaults"),
    }

    match run(&config) {
        Ok(score) => {
            info!("Game over, final score {}", score);
            println!("Final score: {score}");
            Ok(())
        }
        Err(e) => {
            error!("Game aborted: {}", e);
            Err(e.into())
        }
    }
}

fn run(config: &GameConfig) -> GameResult<u32> {
    let mut renderer = TerminalRenderer::stdout(&config.assets.directory)?;
    let mut input = TerminalInput::new(Duration::from_secs_f32(config.runtime.key_hold));
    let camera = config.camera.build(renderer.aspect_ratio());
    let mut scene = Scene::new(config.clone(), camera);

    let session = TerminalSession::enter()?;
    scene.populate(&mut renderer)?;

    let frame_budget = Duration::from_secs_f64(1.0 / f64::from(config.runtime.target_fps));
    let mut timer = Timer::with_max_delta(config.runtime.max_dt);

    while !input.close_requested() {
        let started = Instant::now();
        let dt = timer.tick();

        scene.camera_mut().set_aspect_ratio(renderer.aspect_ratio());
        renderer.set_status(format!(
            "Score: {}  Pellets: {}  [arrows] move  [q] quit",
            scene.score(),
            scene.live_pellets()
        ));
        scene.tick(&mut input, &mut renderer, dt)?;

        if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    let score = scene.score();
    info!(
        "Closing after {} ticks ({:.1} fps average)",
        scene.ticks(),
        timer.average_fps()
    );
    scene.teardown(&mut renderer);
    drop(session);
    Ok(score)
}
