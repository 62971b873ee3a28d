mod script;
mod trace_host;

use clap::{Parser, Subcommand};
use lineup_core::help;
use lineup_core::table::TableRenderer;
use lineup_core::SessionConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lineup",
    about = "Offline practice-session driver for the lineup annotation core",
    version,
    propagate_version = true
)]
struct Cli {
    /// Emit the host-call trace as JSON lines
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Session config file (YAML); defaults apply when omitted
    #[arg(long, global = true, env = "LINEUP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a practice-session script against a tracing host
    Run {
        script: PathBuf,

        /// Map the simulated session runs on (drives default filenames)
        #[arg(long, default_value = "de_dust2")]
        map: String,
    },

    /// Print the chat-command reference table
    Table,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { script, map } => {
            script::run(&script, cli.config.as_deref(), &map, cli.json)
        }
        Commands::Table => print_table(cli.config.as_deref(), cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn print_table(config: Option<&std::path::Path>, json: bool) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let rows = help::help_rows();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let table =
        TableRenderer::new(config.help_table_columns, config.help_table_width).render(&rows);
    print!("{table}");
    Ok(())
}
