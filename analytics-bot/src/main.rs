//! Binary: `run` supervises the bot, `cleanup` purges expired messages once.

use analytics_bot::components::open_store;
use analytics_bot::{
    init_tracing, load_config, run_bot, AnalyticsConfig, BaseConfig, Cli, Commands, Supervisor,
    SupervisorExit, SupervisorPolicy,
};
use anyhow::Result;
use clap::Parser;
use storage::MessageStore;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            init_tracing(config.log_file())?;

            let (supervisor, _status) = Supervisor::new(SupervisorPolicy::default());
            let exit = supervisor
                .run(|status| run_bot(config.clone(), status))
                .await;
            match exit {
                SupervisorExit::TooManyFailures { consecutive } => {
                    error!(consecutive = consecutive, "👋 Supervisor gave up");
                    anyhow::bail!("bot failed {} times in a row", consecutive)
                }
                SupervisorExit::RestartLimit { runs } => {
                    info!(runs = runs, "👋 Application shutdown complete");
                    Ok(())
                }
            }
        }
        Commands::Cleanup => {
            let base = BaseConfig::load_without_token();
            base.validate()?;
            let analytics = AnalyticsConfig::from_env()?;
            analytics.validate()?;
            init_tracing(&base.log_file)?;

            let store = open_store(&base).await?;
            let deleted = store.purge_older_than(analytics.retention()).await?;
            info!(
                deleted = deleted,
                retention_days = analytics.retention_days,
                "✅ Cleanup completed"
            );
            Ok(())
        }
    }
}
