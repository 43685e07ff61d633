//! Interactive loop over stdin
//!
//! Usage: teletutor repl

use std::io::{BufRead, Write};
use teletutor_core::{Session, SessionConfig};

use super::request::handle_raw_line;

/// Handle stdin line by line until EOF; failures are printed, never fatal
pub fn execute(config: SessionConfig) -> anyhow::Result<()> {
    let mut session = Session::new(config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for raw in stdin.lock().split(b'\n') {
        let raw = raw?;
        if let Some(output) = handle_raw_line(&mut session, &raw) {
            writeln!(out, "{}", output.text)?;
            out.flush()?;
        }
    }

    Ok(())
}
