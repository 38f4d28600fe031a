use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::action_map::ActionMapping;
use crate::emulator::{AtariAction, Emulator, EmulatorConfig};
use crate::frame::{blank_frame, downscale, screen_to_frame, FramePair, GrayFrame};
use crate::frame_ring_buffer::FrameRingBuffer;
use crate::observation::Observation;
use crate::prelude::{AleError, Environment, ModelActionType, Transition};
use crate::viewer::ConsoleViewer;

#[derive(Clone, Debug)]
pub struct AtariConfig {
    /// Number of emulator frames one chosen action is repeated for
    pub frame_skip: usize,
    /// Upper bound of the random number of no-op actions performed after a game reset
    pub noop_max: usize,
    /// Whether losing a life ends the episode
    pub terminate_on_end_life: bool,
    pub random_seed: i32,
    /// Number of frames stacked into one observation
    pub frame_history_length: usize,
    /// Show the screen in the terminal
    pub use_gui: bool,
    pub max_num_frames: i32,
    /// Probability of silently repeating the previous action instead of the requested one
    pub repeat_action_probability: f64,
}

impl AtariConfig {
    pub fn validate(&self) -> Result<()> {
        if self.frame_skip == 0 {
            return Err(AleError::from("frame_skip must be at least 1"))?;
        }
        if self.frame_history_length == 0 {
            return Err(AleError::from("frame_history_length must be at least 1"))?;
        }
        if !(0.0..=1.0).contains(&self.repeat_action_probability) {
            return Err(AleError(format!(
                "repeat_action_probability {} is not within 0..=1",
                self.repeat_action_probability
            )))?;
        }
        Ok(())
    }

    pub fn emulator_config(&self) -> EmulatorConfig {
        EmulatorConfig {
            random_seed: self.random_seed,
            max_num_frames_per_episode: self.max_num_frames,
        }
    }
}

impl Default for AtariConfig {
    fn default() -> Self {
        Self {
            frame_skip: 4,
            noop_max: 30,
            terminate_on_end_life: false,
            random_seed: 123,
            frame_history_length: 4,
            use_gui: false,
            max_num_frames: 500_000,
            repeat_action_probability: 0.0,
        }
    }
}

/// Atari game session producing stacked, down-scaled grayscale observations
pub struct AtariEnvironment<E: Emulator> {
    emulator: E,
    config: AtariConfig,
    action_mapping: ActionMapping,
    current_lives: i32,
    is_terminal: bool,
    previous_action: ModelActionType,
    rng: StdRng,
    screen_dims: (usize, usize),
    screen_buffer: Vec<u8>,
    /// last captured screen in native resolution
    original_frame: GrayFrame,
    last_two_frames: FramePair,
    frame_history: FrameRingBuffer,
    viewer: Option<ConsoleViewer>,
}

#[cfg(feature = "ale")]
impl AtariEnvironment<crate::ale::Ale> {
    /// Starts the native emulator with `rom`
    pub fn load(
        rom: &std::path::Path,
        config: AtariConfig,
    ) -> Result<Self> {
        let ale = crate::ale::Ale::load(rom, &config.emulator_config())?;
        Self::new(ale, config)
    }
}

impl<E: Emulator> AtariEnvironment<E> {
    pub fn new(
        emulator: E,
        config: AtariConfig,
    ) -> Result<Self> {
        config.validate()?;
        let action_mapping = ActionMapping::new(emulator.minimal_action_set())?;
        let (width, height) = emulator.screen_dims();
        let viewer = if config.use_gui { Some(ConsoleViewer::new()?) } else { None };

        Ok(Self {
            current_lives: emulator.lives(),
            is_terminal: false,
            previous_action: 0,
            rng: StdRng::seed_from_u64(config.random_seed as u64),
            screen_dims: (width, height),
            screen_buffer: vec![0; width * height],
            original_frame: GrayFrame::new(width as u32, height as u32),
            last_two_frames: FramePair::default(),
            frame_history: FrameRingBuffer::new(config.frame_history_length),
            viewer,
            action_mapping,
            emulator,
            config,
        })
    }

    pub fn emulator(&self) -> &E { &self.emulator }

    pub fn config(&self) -> &AtariConfig { &self.config }

    pub fn action_mapping(&self) -> &ActionMapping { &self.action_mapping }

    pub fn num_actions(&self) -> usize { self.action_mapping.len() }

    pub fn lives(&self) -> i32 { self.current_lives }

    /// Copy of the console RAM
    pub fn ram(&self) -> Vec<u8> {
        let mut ram = vec![0; self.emulator.ram_size()];
        self.emulator.ram(&mut ram);
        ram
    }

    /// The current screen down-scaled; keeps the native resolution version for the viewer
    fn capture_frame(&mut self) -> Result<GrayFrame> {
        let (width, height) = self.screen_dims;
        self.emulator.screen_grayscale(&mut self.screen_buffer);
        self.original_frame = screen_to_frame(&self.screen_buffer, width, height)?;
        Ok(downscale(&self.original_frame))
    }

    /// Repeats `action` for `repeat` emulator frames and returns the summed reward.
    /// The frames of the final two repetitions end up in `last_two_frames`.
    fn act(
        &mut self,
        action: AtariAction,
        repeat: usize,
    ) -> Result<i32> {
        let mut reward = 0;
        for i in 0..repeat {
            reward += self.emulator.act(action);
            if i + 2 >= repeat {
                let frame = self.capture_frame()?;
                self.last_two_frames.push(frame);
            }
        }

        if self.emulator.game_over() {
            self.is_terminal = true;
        }

        let lives = self.emulator.lives();
        if lives != self.current_lives {
            if lives < self.current_lives {
                log::debug!("life lost ({} -> {})", self.current_lives, lives);
                if self.config.terminate_on_end_life {
                    self.is_terminal = true;
                }
            }
            self.current_lives = lives;
        }

        Ok(reward)
    }

    /// Applies an emulator action for one frame-skip window and returns (state, reward, next state)
    pub fn perform_atari_action(
        &mut self,
        atari_action: AtariAction,
    ) -> Result<(Observation, f32, Observation)> {
        let state = self.current_state();
        let reward = self.act(atari_action, self.config.frame_skip)?;
        self.refresh_gui();

        self.frame_history.add(self.last_two_frames.max_pooled());
        let next_state = self.current_state();

        Ok((state, reward as f32, next_state))
    }

    fn refresh_gui(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.refresh(&self.original_frame);
        }
    }
}

impl<E: Emulator> Environment for AtariEnvironment<E> {
    type S = Observation;

    fn reset_environment(&mut self) -> Result<()> {
        if !self.config.terminate_on_end_life || self.emulator.game_over() {
            log::debug!("resetting game");
            self.emulator.reset_game();
        }

        let frame = self.capture_frame()?;
        self.last_two_frames = FramePair::new(blank_frame(), frame);
        self.current_lives = self.emulator.lives();
        self.is_terminal = false;

        if self.config.noop_max > 0 {
            let num_noops = self.rng.gen_range(0..=self.config.noop_max);
            log::trace!("performing {} no-op actions", num_noops);
            self.act(AtariAction::Noop, num_noops)?;
        }

        self.previous_action = 0;
        self.frame_history = FrameRingBuffer::new(self.config.frame_history_length);
        self.frame_history.add(self.last_two_frames.max_pooled());
        self.refresh_gui();
        Ok(())
    }

    fn current_state(&self) -> Observation { self.frame_history.to_observation() }

    fn perform_action(
        &mut self,
        action: ModelActionType,
    ) -> Result<Transition<Observation>> {
        // reject out-of-range requests even if they would get replaced
        self.action_mapping.to_native(action)?;

        let mut action = action;
        if self.config.repeat_action_probability > 0.0 && self.rng.gen::<f64>() < self.config.repeat_action_probability {
            action = self.previous_action;
        }
        self.previous_action = action;

        let atari_action = self.action_mapping.to_native(action)?;
        let (state, reward, next_state) = self.perform_atari_action(atari_action)?;
        Ok(Transition {
            state,
            action,
            reward,
            next_state,
            terminal: self.is_terminal,
        })
    }

    fn actions_for_state(
        &self,
        _state: &Observation,
    ) -> Vec<ModelActionType> {
        self.action_mapping.indices()
    }

    fn is_current_state_terminal(&self) -> bool { self.is_terminal }

    fn set_terminate_on_end_life(
        &mut self,
        terminate_on_end_life: bool,
    ) {
        self.config.terminate_on_end_life = terminate_on_end_life;
    }
}
