/// Devreel Player Simulator - headless replay of scripted player sessions
use clap::{Parser, Subcommand};
use devreel_player::format_time;
use devreel_player_sim::{run_session, Script, SimConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "devreel-player-sim")]
#[command(about = "Replay scripted sessions against a headless Devreel video player", long_about = None)]
struct Cli {
    /// Log player commands at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session script and print the final player view as JSON
    Run {
        /// Session script (JSON)
        script: PathBuf,

        /// Configuration file path (defaults to ./devreel.toml when present)
        #[arg(short, long, env = "DEVREEL_CONFIG")]
        config: Option<PathBuf>,

        /// Reject every play() as an autoplay policy would
        #[arg(long)]
        autoplay_blocked: bool,

        /// Include the emitted player events in the output
        #[arg(long)]
        events: bool,
    },
    /// Print seconds the way the player's time label does
    Format {
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "devreel_player=debug,devreel_player_sim=debug"
    } else {
        "devreel_player=info,devreel_player_sim=info"
    };

    // Initialize tracing; stdout is reserved for JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run {
            script,
            config,
            autoplay_blocked,
            events,
        } => {
            let mut sim_config = SimConfig::load(config.as_deref())?;
            if autoplay_blocked {
                sim_config.media.autoplay_blocked = true;
            }

            let script = Script::load(&script)?;
            let report = run_session(&script, &sim_config).await?;

            let output = if events {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string_pretty(&report.view)?
            };
            println!("{}", output);
        }
        Commands::Format { seconds } => {
            println!("{}", format_time(Some(seconds)));
        }
    }

    Ok(())
}
