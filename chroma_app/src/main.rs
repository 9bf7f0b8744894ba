//! Headless runner for the color-door puzzle.
//!
//! Loads a config, builds the level and replays a RON input script one
//! fixed frame at a time, logging how the run ends.
//!
//! ```text
//! chroma_app [config.toml|config.ron]
//! ```

use std::path::{Path, PathBuf};

use chroma_engine::assets::{AssetError, MeshLibrary};
use chroma_engine::config::{Config, ConfigError, GameConfig};
use chroma_engine::foundation::{logging, time::FrameClock};
use chroma_engine::game::{FrameOutcome, GameError, GameState, PlayerInput, World};
use chroma_engine::scene::{load_level_file, LevelError};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "chroma.toml";

/// Frames to run when there is neither a script nor a frame limit
const IDLE_FRAMES: u64 = 600;

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad input script {path}: {message}")]
    Script { path: PathBuf, message: String },
}

/// One script step: `input` held for `frames` frames.
#[derive(Debug, Clone, Deserialize)]
struct ScriptedInput {
    frames: u32,
    #[serde(default)]
    input: PlayerInput,
}

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("chroma_app: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = GameConfig::load_or_default(&config_path)?;
    logging::init_with_filter(&config.logging.filter);
    log::info!("Using config {}", config_path.display());

    let base = config_path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut library = MeshLibrary::with_primitives();
    for source in &config.level.models {
        library.load_obj(&source.name, base.join(&source.path))?;
    }

    let instances = load_level_file(base.join(&config.level.path))?;
    let script = load_script(&base.join(&config.simulation.script))?;

    let mut world = World::new(config)?;
    world.load_instances(instances, &library)?;

    let max_frames = world.config().simulation.max_frames;
    let mut clock = FrameClock::new(world.config().simulation.fixed_dt);
    let inputs = expand_script(&script, max_frames);

    for input in inputs {
        let delta_time = clock.tick();
        match world.frame(&input, delta_time)? {
            FrameOutcome::Won => break,
            FrameOutcome::Reset => {
                log::warn!("Player reset on frame {}", clock.frame_count());
            }
            FrameOutcome::Continue => {}
        }
    }

    report(&world, &clock);
    Ok(())
}

fn read_text(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the replay script. A missing file means an idle run.
fn load_script(path: &Path) -> Result<Vec<ScriptedInput>, AppError> {
    if !path.exists() {
        log::info!("No input script at {}, running idle", path.display());
        return Ok(Vec::new());
    }
    let text = read_text(path)?;
    let script: Vec<ScriptedInput> = ron::from_str(&text).map_err(|e| AppError::Script {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    log::info!("Loaded {} script steps from {}", script.len(), path.display());
    Ok(script)
}

/// One input per frame, capped at `max_frames`.
///
/// An empty script idles for `max_frames`, or [`IDLE_FRAMES`] without a cap.
fn expand_script(script: &[ScriptedInput], max_frames: Option<u64>) -> Vec<PlayerInput> {
    let frames: Vec<PlayerInput> = if script.is_empty() {
        let count = max_frames.unwrap_or(IDLE_FRAMES);
        std::iter::repeat(PlayerInput::idle())
            .take(usize::try_from(count).unwrap_or(usize::MAX))
            .collect()
    } else {
        script
            .iter()
            .flat_map(|step| std::iter::repeat(step.input).take(step.frames as usize))
            .collect()
    };

    match max_frames.and_then(|max| usize::try_from(max).ok()) {
        Some(max) => frames.into_iter().take(max).collect(),
        None => frames,
    }
}

fn report(world: &World, clock: &FrameClock) {
    let player = world.player();
    let result = match world.state() {
        GameState::Won => "won",
        GameState::Running => "still running",
    };
    log::info!(
        "Run {} after {} frames ({:.2}s simulated, {:.0} fps)",
        result,
        clock.frame_count(),
        clock.simulated_time(),
        clock.average_fps()
    );
    log::info!(
        "Resets: {}, final position {}, phone {}",
        world.reset_count(),
        player.position(),
        player.phone().state()
    );
}
