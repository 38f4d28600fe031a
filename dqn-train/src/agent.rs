use std::fs;
use std::path::Path;

use anyhow::Result;
use atari_env::prelude::{DebugVisualizer, Environment, ModelActionType};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub reward: f32,
}

/// A learning agent acting in environment `E`
pub trait Agent<E: Environment> {
    /// Action the agent's policy picks for `state`
    fn action(
        &mut self,
        state: &E::S,
    ) -> Result<ModelActionType>;

    /// Acts and learns in `environment` (which is expected to be freshly reset) until the episode terminates
    /// or `max_episode_steps` have been performed.
    fn run_learning_episode(
        &mut self,
        environment: &mut E,
        max_episode_steps: Option<usize>,
    ) -> Result<EpisodeSummary>;

    /// Current exploration rate
    fn epsilon(&self) -> f64;

    fn save_checkpoint(
        &self,
        file: &Path,
    ) -> Result<()>;
}

/// Baseline agent picking uniformly distributed actions. It does not learn anything.
pub struct RandomAgent {
    num_actions: usize,
    rng: StdRng,
    action_counts: FxHashMap<ModelActionType, usize>,
    step_count: usize,
    episode_count: usize,
}

impl RandomAgent {
    pub fn new(
        num_actions: usize,
        seed: u64,
    ) -> Self {
        assert!(num_actions > 0);
        Self {
            num_actions,
            rng: StdRng::seed_from_u64(seed),
            action_counts: FxHashMap::default(),
            step_count: 0,
            episode_count: 0,
        }
    }

    pub fn step_count(&self) -> usize { self.step_count }

    pub fn episode_count(&self) -> usize { self.episode_count }

    /// `"<action> <share>%"` per performed action, ordered by action
    pub fn action_distribution(&self) -> String {
        let total = self.action_counts.values().sum::<usize>().max(1);
        self.action_counts
            .iter()
            .sorted()
            .map(|(&action, &count)| format!("{} {:.1}%", action, 100.0 * count as f32 / total as f32))
            .join(", ")
    }
}

impl<E: Environment> Agent<E> for RandomAgent {
    fn action(
        &mut self,
        _state: &E::S,
    ) -> Result<ModelActionType> {
        Ok(self.rng.gen_range(0..self.num_actions) as ModelActionType)
    }

    fn run_learning_episode(
        &mut self,
        environment: &mut E,
        max_episode_steps: Option<usize>,
    ) -> Result<EpisodeSummary> {
        let mut summary = EpisodeSummary { steps: 0, reward: 0.0 };
        while !environment.is_current_state_terminal() && max_episode_steps.map_or(true, |max| summary.steps < max) {
            let state = environment.current_state();
            let action = <Self as Agent<E>>::action(self, &state)?;
            let transition = environment.perform_action(action)?;

            *self.action_counts.entry(transition.action).or_insert(0) += 1;
            summary.steps += 1;
            summary.reward += transition.reward;
        }
        self.step_count += summary.steps;
        self.episode_count += 1;
        log::debug!(
            "episode {} finished after {} steps, final state: {}",
            self.episode_count,
            summary.steps,
            environment.current_state().one_line_info()
        );
        Ok(summary)
    }

    fn epsilon(&self) -> f64 { 1.0 }

    fn save_checkpoint(
        &self,
        file: &Path,
    ) -> Result<()> {
        let content = format!(
            "agent: random\nnum_actions: {}\nsteps: {}\nepisodes: {}\naction_distribution: {}\n",
            self.num_actions,
            self.step_count,
            self.episode_count,
            self.action_distribution()
        );
        fs::write(file, content)?;
        log::debug!("wrote checkpoint {}", file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use atari_env::test::scripted_emulator::ScriptedEmulator;
    use atari_env::{AtariConfig, AtariEnvironment};

    use super::*;

    fn environment(game_over_at: u64) -> AtariEnvironment<ScriptedEmulator> {
        let config = AtariConfig {
            noop_max: 0,
            ..AtariConfig::default()
        };
        let mut env = AtariEnvironment::new(ScriptedEmulator::new(0).with_game_over_at(game_over_at), config).unwrap();
        env.reset_environment().unwrap();
        env
    }

    #[test]
    fn test_episode_runs_until_terminal() -> Result<()> {
        let mut env = environment(40);
        let mut agent = RandomAgent::new(env.num_actions(), 1);
        let summary = agent.run_learning_episode(&mut env, None)?;
        assert_eq!(summary.steps, 10);
        assert!(env.is_current_state_terminal());
        assert_eq!(agent.step_count(), 10);
        assert_eq!(agent.episode_count(), 1);
        // only Fire earns a reward, 4 per step
        assert_eq!(summary.reward % 4.0, 0.0);
        Ok(())
    }

    #[test]
    fn test_episode_step_limit() -> Result<()> {
        let mut env = environment(400);
        let mut agent = RandomAgent::new(env.num_actions(), 1);
        let summary = agent.run_learning_episode(&mut env, Some(3))?;
        assert_eq!(summary.steps, 3);
        assert!(!env.is_current_state_terminal());
        Ok(())
    }

    #[test]
    fn test_actions_in_range() -> Result<()> {
        let env = environment(40);
        let mut agent = RandomAgent::new(4, 7);
        let state = env.current_state();
        for _ in 0..100 {
            let action = Agent::<AtariEnvironment<ScriptedEmulator>>::action(&mut agent, &state)?;
            assert!(action < 4);
        }
        Ok(())
    }

    #[test]
    fn test_save_checkpoint() -> Result<()> {
        let mut env = environment(40);
        let mut agent = RandomAgent::new(env.num_actions(), 1);
        agent.run_learning_episode(&mut env, None)?;

        let dir = tempfile::tempdir()?;
        let file = dir.path().join("random.ckpt");
        Agent::<AtariEnvironment<ScriptedEmulator>>::save_checkpoint(&agent, &file)?;
        let content = fs::read_to_string(&file)?;
        assert!(content.starts_with("agent: random\nnum_actions: 4\nsteps: 10\nepisodes: 1\n"));
        assert!(content.contains('%'));
        Ok(())
    }
}
