use anyhow::Result;
use atari_env::AtariEnvironment;
use clap::Parser;
use dqn_train::agent::RandomAgent;
use dqn_train::cli::Cli;
use dqn_train::log::init_logging;
use dqn_train::train::Trainer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let rom = cli.rom_path();
    let mut environment = AtariEnvironment::load(&rom, cli.atari_config())?;
    log::info!("loaded {} with {} actions", rom.display(), environment.num_actions());

    let mut agent = RandomAgent::new(environment.num_actions(), cli.seed as u64);
    let mut trainer = Trainer::new(&cli.game, &cli.results_dir(), cli.train_parameter(), cli.seed as u64);
    let summary = trainer.train(&mut agent, &mut environment)?;

    log::info!(
        "finished after {} steps and {} episodes, best mean reward: {:?}",
        summary.steps,
        summary.episodes,
        summary.best_eval_reward
    );
    Ok(())
}
