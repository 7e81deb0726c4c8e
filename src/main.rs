//! Opossum Garden headless driver
//!
//! Builds the demo garden and plays it with a simple autopilot through the
//! same key-event path a windowed frontend would use.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Env};
use glam::UVec2;
use log::LevelFilter;

use opossum_garden::audio::AudioLog;
use opossum_garden::consts::FRAME_DT;
use opossum_garden::platform::Key;
use opossum_garden::scene::Scene;
use opossum_garden::sim::GameState;
use opossum_garden::{GardenMode, Settings};

/// Sneak into the garden and eat everything without being spotted
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file (missing keys use defaults)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Frames to simulate
    #[arg(long, default_value_t = 60 * 60 * 3)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = FRAME_DT)]
    dt: f32,

    /// Override the patrol RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

/// Keys the autopilot holds this frame
fn plan(state: &GameState) -> Vec<Key> {
    if state.patrol.has_spawned() {
        return vec![Key::Return];
    }
    if state.target.is_some() {
        return vec![Key::Space];
    }

    let player = state.player.position;
    let Some(food) = state.foods.iter().min_by(|a, b| {
        a.position
            .distance_squared(player)
            .total_cmp(&b.position.distance_squared(player))
    }) else {
        return Vec::new();
    };

    let delta = food.position - player;
    let mut keys = Vec::new();
    if delta.x > 1.0 {
        keys.push(Key::D);
    } else if delta.x < -1.0 {
        keys.push(Key::A);
    }
    if delta.y > 1.0 {
        keys.push(Key::W);
    } else if delta.y < -1.0 {
        keys.push(Key::S);
    }
    keys
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let scene = Scene::demo_garden(&settings);
    let mut mode = GardenMode::new(scene, settings, AudioLog::new())
        .context("demo garden failed to load")?;
    mode.draw(UVec2::new(1280, 720));
    log::info!("Opossum Garden starting: {} frames of {}s", args.frames, args.dt);

    let mut held: Vec<Key> = Vec::new();
    let mut last_text = String::new();
    for _ in 0..args.frames {
        let wanted = plan(mode.state());
        for key in held.iter().filter(|k| !wanted.contains(k)) {
            mode.handle_key_up(*key);
        }
        for key in wanted.iter().filter(|k| !held.contains(k)) {
            mode.handle_key_down(*key);
        }
        held = wanted;

        mode.update(args.dt);
        if mode.show_text() != last_text {
            last_text = mode.show_text().to_string();
            log::debug!("HUD: {:?}", last_text);
        }
        if mode.is_game_over() {
            break;
        }
    }

    let state = mode.state();
    log::info!(
        "{:?} after {} frames: {} foods left, {} patrol passes, {:?}",
        state.phase,
        state.frame,
        state.foods.len(),
        state.patrol.passes,
        mode.show_text()
    );
    log::info!(
        "Audio: {} calls, {} loops still playing",
        mode.audio().calls.len(),
        mode.audio().live_loops()
    );
    Ok(())
}
