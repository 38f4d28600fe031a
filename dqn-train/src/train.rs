use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use atari_env::prelude::Environment;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agent::Agent;
use crate::evaluation::evaluate_agent_reward;
use crate::results::ResultsLog;
use crate::util::format::grouped;
use crate::util::stats;

#[derive(Clone, Debug)]
pub struct Parameter {
    /// Total number of environment steps to train for
    pub num_steps: usize,
    /// Number of training steps between two evaluations
    pub test_interval: usize,
    /// Number of steps played per evaluation
    pub test_frames: usize,
    /// Exploration rate used during evaluation
    pub test_epsilon: f64,
    pub max_episode_steps: Option<usize>,
}

impl Default for Parameter {
    fn default() -> Self {
        Self {
            num_steps: 50_000_000,
            test_interval: 250_000,
            test_frames: 125_000,
            test_epsilon: 0.05,
            max_episode_steps: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrainSummary {
    pub steps: usize,
    pub episodes: usize,
    pub evaluations: usize,
    pub best_eval_reward: Option<f32>,
}

/// Runs learning episodes and evaluates the agent in regular intervals.
///
/// Evaluation results go to `<results_dir>/<game>_results.txt`,
/// the agent of the best evaluation so far to `<results_dir>/<game>_best_net.ckpt`.
pub struct Trainer {
    param: Parameter,
    game: String,
    results_dir: PathBuf,
    rng: StdRng,
}

impl Trainer {
    pub fn new(
        game: &str,
        results_dir: &Path,
        param: Parameter,
        seed: u64,
    ) -> Self {
        Self {
            param,
            game: game.to_string(),
            results_dir: results_dir.to_path_buf(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn results_file(&self) -> PathBuf { self.results_dir.join(format!("{}_results.txt", self.game)) }

    pub fn checkpoint_file(&self) -> PathBuf { self.results_dir.join(format!("{}_best_net.ckpt", self.game)) }

    pub fn train<E, A>(
        &mut self,
        agent: &mut A,
        environment: &mut E,
    ) -> Result<TrainSummary>
    where
        E: Environment,
        A: Agent<E>,
    {
        let mut results = ResultsLog::create(&self.results_file())?;

        let mut summary = TrainSummary {
            steps: 0,
            episodes: 0,
            evaluations: 0,
            best_eval_reward: None,
        };
        let mut steps_until_test = self.param.test_interval as i64;

        while summary.steps < self.param.num_steps {
            environment.reset_environment()?;
            environment.set_terminate_on_end_life(true);

            let start_time = Instant::now();
            let episode = agent.run_learning_episode(environment, self.param.max_episode_steps)?;
            let elapsed = start_time.elapsed().as_secs_f64();
            summary.steps += episode.steps;
            summary.episodes += 1;

            log::info!(
                "steps: {}, episode reward: {:.1}, steps/sec: {:.1}, 𝜀={:.3}",
                grouped(summary.steps),
                episode.reward,
                if elapsed > 0.0 { episode.steps as f64 / elapsed } else { 0.0 },
                agent.epsilon()
            );

            steps_until_test -= episode.steps as i64;
            if steps_until_test <= 0 {
                steps_until_test += self.param.test_interval as i64;
                self.evaluate(agent, environment, &mut results, &mut summary)?;
            }
        }

        Ok(summary)
    }

    fn evaluate<E, A>(
        &mut self,
        agent: &mut A,
        environment: &mut E,
        results: &mut ResultsLog,
        summary: &mut TrainSummary,
    ) -> Result<()>
    where
        E: Environment,
        A: Agent<E>,
    {
        log::info!("evaluating agent over {} steps", grouped(self.param.test_frames));
        let episode_rewards = evaluate_agent_reward(
            self.param.test_frames,
            environment,
            agent,
            self.param.test_epsilon,
            &mut self.rng,
        )?;
        let mean_reward = stats::mean(&episode_rewards);
        let var_reward = stats::variance(&episode_rewards);

        if summary.best_eval_reward.map_or(true, |best| mean_reward > best) {
            summary.best_eval_reward = Some(mean_reward);
            agent.save_checkpoint(&self.checkpoint_file())?;
        }
        summary.evaluations += 1;

        log::info!(
            "mean reward: {:.2}, variance: {:.2}, best: {:.2} ({} episodes)",
            mean_reward,
            var_reward,
            summary.best_eval_reward.unwrap_or(mean_reward),
            episode_rewards.len()
        );
        results.append(summary.steps, mean_reward, environment.discovered_rooms().as_deref())?;
        Ok(())
    }
}
