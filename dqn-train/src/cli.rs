use std::path::PathBuf;

use atari_env::AtariConfig;
use clap::{Parser, ValueEnum};
use lazy_static::lazy_static;
use log::LevelFilter;

use crate::train::Parameter;

lazy_static! {
    pub static ref DEFAULT_ROM_DIR: PathBuf = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("roms");
}

#[derive(Parser, Debug)]
#[command(name = "dqn-train")]
#[command(version, about = "Deep-Q-Learning on Atari 2600 games")]
pub struct Cli {
    /// Game to train on - base name of the ROM file, e.g. `breakout` for `breakout.bin`
    pub game: String,

    #[arg(long, value_enum, default_value = "dqn")]
    pub variant: Variant,

    /// Directory containing the ROM files [default: roms/ next to this crate]
    #[arg(long)]
    pub rom_dir: Option<PathBuf>,

    /// Base directory for results and checkpoints
    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,

    #[arg(long, default_value_t = 123)]
    pub seed: i32,

    /// Show the game screen in the terminal
    #[arg(long)]
    pub gui: bool,

    /// Probability of sticky actions
    #[arg(long, default_value_t = 0.25)]
    pub repeat_action_probability: f64,

    /// Total number of training steps
    #[arg(long, default_value_t = 50_000_000)]
    pub num_steps: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Variant {
    Dqn,
    DoubleDqn,
}

impl Variant {
    fn dir_name(&self) -> &'static str {
        match self {
            Variant::Dqn => "dqn",
            Variant::DoubleDqn => "double_dqn",
        }
    }

    fn test_epsilon(&self) -> f64 {
        match self {
            Variant::Dqn => 0.05,
            Variant::DoubleDqn => 0.001,
        }
    }
}

impl Cli {
    pub fn rom_path(&self) -> PathBuf {
        self.rom_dir
            .as_ref()
            .unwrap_or(&*DEFAULT_ROM_DIR)
            .join(format!("{}.bin", self.game))
    }

    /// `<results_dir>/<variant>/<game>`
    pub fn results_dir(&self) -> PathBuf { self.results_dir.join(self.variant.dir_name()).join(&self.game) }

    pub fn atari_config(&self) -> AtariConfig {
        AtariConfig {
            random_seed: self.seed,
            use_gui: self.gui,
            repeat_action_probability: self.repeat_action_probability,
            ..AtariConfig::default()
        }
    }

    /// The viewer owns the terminal, so the per-episode progress lines are held back while it is active
    pub fn log_level(&self) -> LevelFilter { if self.gui { LevelFilter::Warn } else { LevelFilter::Info } }

    pub fn train_parameter(&self) -> Parameter {
        Parameter {
            num_steps: self.num_steps,
            test_epsilon: self.variant.test_epsilon(),
            ..Parameter::default()
        }
    }
}
