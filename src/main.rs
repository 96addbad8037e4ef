use ddpg::config::DdpgConfig;
use ddpg::env::Pendulum;
use ddpg::error::Result;
use ddpg::logging::init_file_logger;
use ddpg::trainer::Trainer;

fn main() -> Result<()> {
    let config = DdpgConfig::default();
    init_file_logger(&config.log_path)?;

    let mut trainer = Trainer::new(Pendulum::new(), config)?;
    let report = trainer.run()?;

    if let Some(mean) = report.metrics.mean_recent_return(10) {
        log::debug!("mean return over last 10 episodes: {:.2}", mean);
    }
    Ok(())
}
