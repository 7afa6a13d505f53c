use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use winalias_lib::alias::Scope;

mod cmd;
mod output;
mod prompts;

use cmd::{cmd_add, cmd_edit, cmd_info, cmd_list, cmd_remove, cmd_show, elevation_hint};
use output::{OutputFormat, print_error, print_warning};

/// winalias - manage Windows App Paths aliases
#[derive(Parser)]
#[command(name = "winalias")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List aliases, grouped by registry location
  List {
    /// Only list this scope (machine, user, HKLM, HKCU); both when omitted
    #[arg(short, long)]
    scope: Option<Scope>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show one alias and its registry values
  Show {
    /// Alias name (".exe" is appended when missing)
    name: String,

    /// Scope to look in
    #[arg(short, long, default_value = "user")]
    scope: Scope,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Create or overwrite an alias
  Add {
    /// Alias name (".exe" is appended when missing)
    name: String,

    /// Program the alias starts
    path: String,

    /// Scope to write to (machine requires an elevated prompt)
    #[arg(short, long, default_value = "user")]
    scope: Scope,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Rename an alias or change its program
  Edit {
    /// Current alias name
    name: String,

    /// New alias name
    #[arg(long)]
    rename: Option<String>,

    /// New program path
    #[arg(short, long)]
    path: Option<String>,

    /// Scope the alias lives in
    #[arg(short, long, default_value = "user")]
    scope: Scope,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Remove an alias
  Remove {
    /// Alias name (".exe" is appended when missing)
    name: String,

    /// Scope the alias lives in
    #[arg(short, long, default_value = "user")]
    scope: Scope,

    /// Skip confirmation prompt
    #[arg(long)]
    force: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show backend, elevation and registry locations
  Info {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::List { scope, output } => cmd_list(scope, output),
    Commands::Show { name, scope, output } => cmd_show(&name, scope, output),
    Commands::Add {
      name,
      path,
      scope,
      output,
    } => cmd_add(&name, &path, scope, output),
    Commands::Edit {
      name,
      rename,
      path,
      scope,
      output,
    } => cmd_edit(&name, rename.as_deref(), path.as_deref(), scope, output),
    Commands::Remove {
      name,
      scope,
      force,
      output,
    } => cmd_remove(&name, scope, force, output),
    Commands::Info { output } => cmd_info(output),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli.command) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      if let Some(hint) = elevation_hint(&err) {
        print_warning(hint);
      }
      ExitCode::FAILURE
    }
  }
}
