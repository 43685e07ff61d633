//! Teletutor CLI
//!
//! Feeds JSON-line commands to a session and prints the results.

use clap::{Parser, Subcommand, ValueEnum};
use teletutor_core::logging_facility::{self, Profile};
use teletutor_core::SessionConfig;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "teletutor")]
#[command(about = "Teletutor - student, attendance and assignment records", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    /// Do not warn about shared names in group attendance reports
    #[arg(long, global = true)]
    no_collision_warnings: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a script of JSON-line commands
    Run(commands::run::RunArgs),
    /// Read JSON-line commands from stdin until EOF
    Repl,
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let config = SessionConfig {
        warn_on_name_collisions: !cli.no_collision_warnings,
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, config),
        Commands::Repl => commands::repl::execute(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
