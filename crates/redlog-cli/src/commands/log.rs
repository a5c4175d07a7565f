use anyhow::Result;
use redlog_core::USER_DATA;
use std::io::BufRead;
use std::path::Path;

pub fn handle(input: Option<&Path>) -> Result<()> {
    let input = super::open_input(input)?;
    log_lines(input)?;
    Ok(())
}

/// One INFO event per non-empty line; the subscriber redacts on the way out
fn log_lines(input: impl BufRead) -> Result<usize> {
    let mut count = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        tracing::info!(target: USER_DATA, "{}", line);
        count += 1;
    }
    Ok(count)
}
