//! CLI parsing and command dispatch.

use std::io;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::{
    commands::{self, help},
    error::{Error, Result},
};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "n8nctl",
    version,
    about = "Manage n8n workflows and resources",
    override_usage = "n8nctl [OPTIONS] <entity> <action> [id] [--data <json>] [--schema]\n       \
                      n8nctl login [--base-url <URL>] [--token <TOKEN>]"
)]
struct Cli {
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,
    /// Enable debug logging on stderr.
    #[arg(long)]
    verbose: bool,
    /// Command to execute.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Save the API base URL and token to ~/.n8nctl/config.json.
    Login {
        /// Instance URL, e.g. https://n8n.example.com.
        #[arg(long)]
        base_url: Option<String>,
        /// API token.
        #[arg(long)]
        token: Option<String>,
    },
    /// `<entity> <action> [id]`, resolved against the entity registry.
    #[command(external_subcommand)]
    Entity(Vec<String>),
}

/// Run the requested command.
pub async fn run() -> Result<()> {
    let mut command = Cli::command().after_help(help::overview());
    let matches = command.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|error| error.exit());
    init_tracing(cli.verbose);
    let color = cli.color.into_choice();

    match cli.command {
        None => {
            println!("{}", command.render_help());
            Err(Error::MissingCommand)
        }
        Some(Command::Login { base_url, token }) => {
            commands::login::run(color, base_url, token).await
        }
        Some(Command::Entity(args)) => match commands::entity::run(color, args).await {
            Err(error @ Error::UnknownEntity { .. }) => {
                println!("{}", command.render_help());
                Err(error)
            }
            result => result,
        },
    }
}

/// Send `tracing` events to stderr. `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}
