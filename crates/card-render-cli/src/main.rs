mod commands;
mod errors;

use std::{path::PathBuf, process};

use card_object_model::UnknownTypePolicy;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::errors::CliError;

#[derive(Parser)]
#[command(name = "card-render")]
#[command(about = "Parse and render Adaptive Card JSON into a UI node tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a card and print its normalized JSON with parse warnings.
    Parse {
        /// Card JSON file, or `-` for stdin.
        #[arg(value_name = "CARD_JSON")]
        card: PathBuf,
        #[arg(long, default_value = "drop", value_parser = parse_policy)]
        policy: UnknownTypePolicy,
        /// Exit with an error when the card produced any warning.
        #[arg(long)]
        deny_warnings: bool,
    },
    /// Render a card and print the UI node tree with all warnings.
    Render {
        #[arg(value_name = "CARD_JSON")]
        card: PathBuf,
        #[arg(long, value_name = "HOST_CONFIG_JSON", env = "CARD_RENDER_HOST_CONFIG")]
        host_config: Option<PathBuf>,
        #[arg(long, default_value = "drop", value_parser = parse_policy)]
        policy: UnknownTypePolicy,
        #[arg(long)]
        deny_warnings: bool,
    },
    /// List the element and action types with a built-in parser or renderer.
    Types,
}

fn parse_policy(value: &str) -> Result<UnknownTypePolicy, String> {
    UnknownTypePolicy::parse(value)
        .ok_or_else(|| format!("unknown policy `{value}` (expected drop, keep or fail)"))
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    };
    process::exit(exit_code);
}

/// Logs go to stderr so stdout stays machine readable; `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Parse {
            card,
            policy,
            deny_warnings,
        } => commands::handle_parse(&card, policy, deny_warnings),
        Command::Render {
            card,
            host_config,
            policy,
            deny_warnings,
        } => commands::handle_render(&card, host_config.as_deref(), policy, deny_warnings),
        Command::Types => commands::handle_types(),
    }
}
