//! Forum digest CLI
//!
//! Scheduled entry point: the weekly check, the mid-week reminder and the
//! forum export each run as one subcommand.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use forum_digest::{
    config::Environment,
    error::Result,
    models::Config,
    pipeline::{self, RunContext},
    source::DiscordClient,
    storage::LocalStorage,
    utils::http::HttpPageFetcher,
};

/// Weekly posting report for a Discord forum
#[derive(Parser, Debug)]
#[command(
    name = "forum-digest",
    version,
    about = "Weekly posting report, reminders and export for a Discord forum"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Post last week's status and hot threads to the notification channel
    Check,

    /// DM members who have not posted this week
    Remind,

    /// Write every forum post to the export file
    Export {
        /// Output file (default: paths.export_file)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate configuration and environment
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Connect to Discord and build the run context.
async fn connect(config: Arc<Config>, env: &Environment) -> Result<RunContext> {
    let client = DiscordClient::new(&config.discord, &env.token)?;
    client.verify().await?;

    let forum = client.open_forum(&env.forum_channel_id).await?;
    log::info!("Forum: #{} ({})", forum.name(), env.forum_channel_id);
    let directory = client.load_members(forum.guild_id()).await?;

    let fetcher = HttpPageFetcher::from_config(&config.thumbnail)?;

    Ok(RunContext {
        forum: Arc::new(forum),
        directory: Arc::new(directory),
        delivery: Arc::new(client),
        fetcher: Arc::new(fetcher),
        config,
    })
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("forum-digest starting...");

    let config = Config::load_or_default(&cli.config);
    config.validate()?;
    let config = Arc::new(config);

    let env = Environment::from_env()?;
    log::debug!("{:?}", env);

    match cli.command {
        Command::Check => {
            let roster = env.require_roster()?;
            let channel_id = env.require_notification_channel()?;
            let ctx = connect(Arc::clone(&config), &env).await?;

            let summary = pipeline::run_weekly_check(&ctx, roster, channel_id, Utc::now()).await?;
            log::info!(
                "Check complete: {} threads, {} posted, {} missing, {} hot sent, {} hot failed",
                summary.threads,
                summary.authors,
                summary.non_authors,
                summary.hot_sent,
                summary.hot_failed
            );
        }

        Command::Remind => {
            let roster = env.require_roster()?;
            let ctx = connect(Arc::clone(&config), &env).await?;

            let summary = pipeline::run_reminder(&ctx, roster, Utc::now()).await?;
            log::info!(
                "Reminders complete: {} sent, {} failed",
                summary.success,
                summary.failure
            );
        }

        Command::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(&config.paths.export_file));
            let storage = LocalStorage::new(path);
            let ctx = connect(Arc::clone(&config), &env).await?;

            let summary = pipeline::run_export(&ctx, &storage).await?;
            log::info!("Export complete: {} posts in {}", summary.count, summary.location);
        }

        Command::Validate => {
            log::info!("✓ Config OK ({})", cli.config.display());
            log::info!(
                "✓ Environment OK: forum {}, {} roster members, notification channel {}",
                env.forum_channel_id,
                env.roster.len(),
                env.notification_channel_id.as_deref().unwrap_or("not set")
            );
            log::info!("All validations passed!");
        }
    }

    log::info!("Done!");

    Ok(())
}
