use crate::emulator::{AtariAction, Emulator};

const SCREEN_WIDTH: usize = 160;
const SCREEN_HEIGHT: usize = 210;
const RAM_SIZE: usize = 128;

/// A deterministic stand-in for the native emulator.
///
/// - The screen flickers: on even frames only the left half is lit, on odd frames only the right half.
///   The brightness follows the frame number and the seed.
/// - Each `Fire` frame earns a reward of 1, all other actions 0.
/// - Lives get lost at the scripted episode frame numbers; the game is over when no lives are left
///   or at the scripted game-over frame.
#[derive(Clone, Debug)]
pub struct ScriptedEmulator {
    seed: i32,
    initial_lives: i32,
    life_loss_frames: Vec<u64>,
    game_over_frame: Option<u64>,
    minimal_actions: Vec<AtariAction>,
    lives: i32,
    episode_frame: u64,
    reset_count: usize,
    performed: Vec<AtariAction>,
}

impl ScriptedEmulator {
    pub fn new(seed: i32) -> Self {
        use AtariAction::*;
        Self {
            seed,
            initial_lives: 3,
            life_loss_frames: vec![],
            game_over_frame: None,
            minimal_actions: vec![Noop, Fire, Right, Left],
            lives: 3,
            episode_frame: 0,
            reset_count: 0,
            performed: vec![],
        }
    }

    pub fn with_lives(
        mut self,
        lives: i32,
    ) -> Self {
        self.initial_lives = lives;
        self.lives = lives;
        self
    }

    /// Episode frame numbers (counted from 1) on which one life gets lost
    pub fn with_life_loss_at(
        mut self,
        frames: Vec<u64>,
    ) -> Self {
        self.life_loss_frames = frames;
        self
    }

    pub fn with_game_over_at(
        mut self,
        frame: u64,
    ) -> Self {
        self.game_over_frame = Some(frame);
        self
    }

    pub fn with_minimal_actions(
        mut self,
        actions: Vec<AtariAction>,
    ) -> Self {
        self.minimal_actions = actions;
        self
    }

    pub fn reset_count(&self) -> usize { self.reset_count }

    pub fn episode_frame(&self) -> u64 { self.episode_frame }

    /// Every action applied since construction, one entry per frame
    pub fn performed_actions(&self) -> &[AtariAction] { &self.performed }

    /// Luminance of the screen at `(x, y)` for the given episode frame
    pub fn pixel(
        &self,
        frame: u64,
        x: usize,
        _y: usize,
    ) -> u8 {
        let lit_left = frame % 2 == 0;
        if (x < SCREEN_WIDTH / 2) == lit_left {
            (40 + (frame * 7 + self.seed.unsigned_abs() as u64) % 200) as u8
        } else {
            0
        }
    }
}

impl Emulator for ScriptedEmulator {
    fn act(
        &mut self,
        action: AtariAction,
    ) -> i32 {
        if self.game_over() {
            return 0;
        }
        self.performed.push(action);
        self.episode_frame += 1;
        if self.life_loss_frames.contains(&self.episode_frame) {
            self.lives -= 1;
        }
        match action {
            AtariAction::Fire => 1,
            _ => 0,
        }
    }

    fn game_over(&self) -> bool {
        self.lives <= 0 || self.game_over_frame.map_or(false, |f| self.episode_frame >= f)
    }

    fn reset_game(&mut self) {
        self.lives = self.initial_lives;
        self.episode_frame = 0;
        self.reset_count += 1;
    }

    fn lives(&self) -> i32 { self.lives }

    fn minimal_action_set(&self) -> Vec<AtariAction> { self.minimal_actions.clone() }

    fn screen_dims(&self) -> (usize, usize) { (SCREEN_WIDTH, SCREEN_HEIGHT) }

    fn screen_grayscale(
        &self,
        buffer: &mut [u8],
    ) {
        assert_eq!(buffer.len(), SCREEN_WIDTH * SCREEN_HEIGHT);
        for (i, p) in buffer.iter_mut().enumerate() {
            *p = self.pixel(self.episode_frame, i % SCREEN_WIDTH, i / SCREEN_WIDTH);
        }
    }

    fn ram_size(&self) -> usize { RAM_SIZE }

    fn ram(
        &self,
        buffer: &mut [u8],
    ) {
        assert_eq!(buffer.len(), RAM_SIZE);
        buffer.fill(0);
        buffer[0] = self.lives as u8;
        buffer[1..9].copy_from_slice(&self.episode_frame.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_emulator() {
        let mut emulator = ScriptedEmulator::new(0).with_life_loss_at(vec![2, 3]).with_lives(2);
        assert_eq!(emulator.act(AtariAction::Fire), 1);
        assert_eq!(emulator.lives(), 2);
        assert_eq!(emulator.act(AtariAction::Noop), 0);
        assert_eq!(emulator.lives(), 1);
        assert!(!emulator.game_over());
        emulator.act(AtariAction::Noop);
        assert!(emulator.game_over());

        // no effect after game over
        assert_eq!(emulator.act(AtariAction::Fire), 0);
        assert_eq!(emulator.episode_frame(), 3);

        emulator.reset_game();
        assert_eq!(emulator.lives(), 2);
        assert_eq!(emulator.episode_frame(), 0);
        assert_eq!(emulator.reset_count(), 1);
        assert_eq!(emulator.performed_actions().len(), 3);
    }

    #[test]
    fn test_screen_flickers() {
        let mut emulator = ScriptedEmulator::new(5);
        let mut screen = vec![0_u8; SCREEN_WIDTH * SCREEN_HEIGHT];
        emulator.screen_grayscale(&mut screen);
        assert!(screen[0] > 0);
        assert_eq!(screen[SCREEN_WIDTH - 1], 0);

        emulator.act(AtariAction::Noop);
        emulator.screen_grayscale(&mut screen);
        assert_eq!(screen[0], 0);
        assert!(screen[SCREEN_WIDTH - 1] > 0);
    }

    #[test]
    fn test_game_over_frame() {
        let mut emulator = ScriptedEmulator::new(0).with_game_over_at(2);
        emulator.act(AtariAction::Noop);
        assert!(!emulator.game_over());
        emulator.act(AtariAction::Noop);
        assert!(emulator.game_over());
    }
}
