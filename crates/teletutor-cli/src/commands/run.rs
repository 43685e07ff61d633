//! Script runner
//!
//! Usage: teletutor run <SCRIPT> [--fail-fast]

use anyhow::{bail, Context};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use teletutor_core::{Session, SessionConfig};

use super::request::handle_line;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to a file of JSON-line commands
    pub script: PathBuf,

    /// Stop at the first failing line and exit with status 1
    #[arg(long)]
    pub fail_fast: bool,
}

/// Execute every line of the script against one fresh session
pub fn execute(args: RunArgs, config: SessionConfig) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;

    let mut session = Session::new(config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for (index, line) in script.lines().enumerate() {
        let Some(output) = handle_line(&mut session, line) else {
            continue;
        };
        writeln!(out, "{}", output.text)?;

        if output.failed {
            tracing::warn!(line = index + 1, "script line failed");
            if args.fail_fast {
                out.flush()?;
                bail!("stopped at line {} of {}", index + 1, args.script.display());
            }
        }
    }

    Ok(())
}
