use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use swipe_core::{Decision, Identity};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::{Context, cmd_clear, cmd_mark, cmd_namespaces, cmd_show, cmd_stats, cmd_unmark};
use output::print_error;

/// swipe-reviewed - Inspect and edit cached review decisions
#[derive(Parser)]
#[command(name = "swipe-reviewed")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output as JSON
  #[arg(long, global = true)]
  json: bool,

  /// Server URL of the account to act on
  #[arg(long, global = true, env = "SWIPE_SERVER_URL")]
  server: Option<String>,

  /// User name of the account to act on
  #[arg(long, global = true, env = "SWIPE_USER", default_value = "")]
  user: String,

  /// API key of the account (does not affect which decisions are used)
  #[arg(long, global = true, env = "SWIPE_API_KEY", default_value = "", hide_env_values = true)]
  api_key: String,

  /// Directory holding storage.json (default: platform data directory)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Record a keep/delete decision for an asset
  Mark {
    /// Asset identifier
    asset: String,

    /// Verdict: keep or delete
    decision: Decision,
  },

  /// Forget the decision for an asset
  Unmark {
    /// Asset identifier
    asset: String,
  },

  /// Show the decision for an asset
  Show {
    /// Asset identifier
    asset: String,
  },

  /// Show decision counts for the account
  Stats,

  /// List every account namespace with stored decisions
  Namespaces,

  /// Remove all decisions for the account
  Clear,
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let ctx = Context {
    identity: Identity::new(cli.server.unwrap_or_default(), cli.api_key, cli.user),
    data_dir: cli.data_dir,
    verbose: cli.verbose,
    json: cli.json,
  };

  if let Err(e) = run(&ctx, cli.command) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(ctx: &Context, command: Commands) -> Result<()> {
  match command {
    Commands::Mark { asset, decision } => cmd_mark(ctx, &asset, decision),
    Commands::Unmark { asset } => cmd_unmark(ctx, &asset),
    Commands::Show { asset } => cmd_show(ctx, &asset),
    Commands::Stats => cmd_stats(ctx),
    Commands::Namespaces => cmd_namespaces(ctx),
    Commands::Clear => cmd_clear(ctx),
  }
}
