use anyhow::Result;
use atari_env::prelude::{AleError, Environment};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::Agent;

/// Plays `steps` steps epsilon-greedy with the agent's policy and returns the total reward of every finished episode.
///
/// Losing a life does not end an episode during evaluation. If not a single episode finished,
/// the reward collected so far is returned as the only entry.
pub fn evaluate_agent_reward<E, A, R>(
    steps: usize,
    environment: &mut E,
    agent: &mut A,
    epsilon: f64,
    rng: &mut R,
) -> Result<Vec<f32>>
where
    E: Environment,
    A: Agent<E>,
    R: Rng,
{
    environment.set_terminate_on_end_life(false);
    environment.reset_environment()?;

    let mut total_reward = 0.0;
    let mut episode_rewards = vec![];
    for _ in 0..steps {
        if environment.is_current_state_terminal() {
            episode_rewards.push(total_reward);
            total_reward = 0.0;
            environment.reset_environment()?;
        }
        let state = environment.current_state();
        let action = if rng.gen::<f64>() < epsilon {
            *environment
                .actions_for_state(&state)
                .choose(rng)
                .ok_or_else(|| AleError::from("no actions available"))?
        } else {
            agent.action(&state)?
        };

        let transition = environment.perform_action(action)?;
        total_reward += transition.reward;
    }
    if episode_rewards.is_empty() {
        episode_rewards.push(total_reward);
    }
    Ok(episode_rewards)
}
