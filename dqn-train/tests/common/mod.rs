use atari_env::test::scripted_emulator::ScriptedEmulator;
use atari_env::{AtariConfig, AtariEnvironment};

pub const GAME: &str = "scripted";

/// Episodes of ten steps (40 frames with a frame skip of 4)
pub fn scripted_environment() -> AtariEnvironment<ScriptedEmulator> {
    let emulator = ScriptedEmulator::new(0).with_life_loss_at(vec![20]).with_game_over_at(40);
    let config = AtariConfig {
        noop_max: 0,
        ..AtariConfig::default()
    };
    AtariEnvironment::new(emulator, config).expect("scripted environment")
}
