use std::fmt::{Display, Formatter};

use anyhow::Result;

use crate::prelude::AleError;

/// Joystick actions of the Atari 2600 as numbered by the emulator
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum AtariAction {
    Noop,
    Fire,
    Up,
    Right,
    Left,
    Down,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
    UpFire,
    RightFire,
    LeftFire,
    DownFire,
    UpRightFire,
    UpLeftFire,
    DownRightFire,
    DownLeftFire,
}

impl AtariAction {
    pub const ALL: [AtariAction; 18] = [
        AtariAction::Noop,
        AtariAction::Fire,
        AtariAction::Up,
        AtariAction::Right,
        AtariAction::Left,
        AtariAction::Down,
        AtariAction::UpRight,
        AtariAction::UpLeft,
        AtariAction::DownRight,
        AtariAction::DownLeft,
        AtariAction::UpFire,
        AtariAction::RightFire,
        AtariAction::LeftFire,
        AtariAction::DownFire,
        AtariAction::UpRightFire,
        AtariAction::UpLeftFire,
        AtariAction::DownRightFire,
        AtariAction::DownLeftFire,
    ];

    /// Action id as understood by the emulator
    pub fn id(&self) -> i32 { *self as i32 }

    pub fn try_from_id(id: i32) -> Result<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| AleError(format!("unknown emulator action id {}", id)).into())
    }
}

impl Display for AtariAction {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Settings handed to the emulator before the ROM gets loaded.
///
/// Frame skipping and sticky actions are performed by [crate::AtariEnvironment], so the emulator itself always
/// runs with a frame skip of 1 and a repeat action probability of 0.
#[derive(Clone, Debug)]
pub struct EmulatorConfig {
    pub random_seed: i32,
    pub max_num_frames_per_episode: i32,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            random_seed: 123,
            max_num_frames_per_episode: 500_000,
        }
    }
}

/// The Atari emulator as seen by the environment
pub trait Emulator {
    /// Applies `action` for a single frame and returns the reward of that frame
    fn act(
        &mut self,
        action: AtariAction,
    ) -> i32;

    fn game_over(&self) -> bool;

    fn reset_game(&mut self);

    fn lives(&self) -> i32;

    /// Actions which have an effect in the loaded game, in emulator order
    fn minimal_action_set(&self) -> Vec<AtariAction>;

    /// (width, height) of the native screen
    fn screen_dims(&self) -> (usize, usize);

    /// Writes the current screen as one luminance byte per pixel (row major) into `buffer`,
    /// which must hold `width * height` bytes.
    fn screen_grayscale(
        &self,
        buffer: &mut [u8],
    );

    fn ram_size(&self) -> usize;

    fn ram(
        &self,
        buffer: &mut [u8],
    );
}
