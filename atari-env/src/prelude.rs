use std::fmt::{Display, Formatter};

use anyhow::Result;

/// Data type we use to encode an action index to feed the model.
/// The minimal action set of an Atari game never exceeds 18 entries.
pub type ModelActionType = u8;

/// One performed step: the state before, the effectively applied action, the reward, the state after
/// and whether the episode has ended with that step.
#[derive(Clone, Debug)]
pub struct Transition<S> {
    pub state: S,
    pub action: ModelActionType,
    pub reward: f32,
    pub next_state: S,
    pub terminal: bool,
}

/// Learning environment, modeling the world of a learning agent
pub trait Environment {
    /// State representation, handed out as an independent copy
    type S: Clone + DebugVisualizer;

    /// Resets the environment to the start of a new episode
    fn reset_environment(&mut self) -> Result<()>;

    /// Copy of the current state
    fn current_state(&self) -> Self::S;

    /// Performs one time/action-step.
    ///
    /// Applies the action with the given index to the environment and returns the resulting [Transition].
    fn perform_action(
        &mut self,
        action: ModelActionType,
    ) -> Result<Transition<Self::S>>;

    /// Action indices which may be performed in `state`
    fn actions_for_state(
        &self,
        state: &Self::S,
    ) -> Vec<ModelActionType>;

    fn is_current_state_terminal(&self) -> bool;

    /// Switches whether the loss of a life ends the episode
    fn set_terminate_on_end_life(
        &mut self,
        terminate_on_end_life: bool,
    );

    /// Rooms visited so far, for environments which track exploration progress
    fn discovered_rooms(&self) -> Option<Vec<u32>> { None }
}

pub trait DebugVisualizer {
    fn one_line_info(&self) -> String;
}

#[derive(Debug)]
pub struct AleError(pub String);

impl AleError {
    pub fn from(msg: &str) -> Self { AleError(msg.to_string()) }
}

impl Display for AleError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for AleError {}
