use anyhow::Result;
use redlog_config::Config;
use redlog_redact::{RedactionSettings, Redactor};
use std::io::{self, BufRead, Write};

use crate::cli::RedactArgs;

pub fn handle(args: RedactArgs, config: &Config) -> Result<()> {
    let settings = settings(&args, &config.redaction);
    let redactor = Redactor::from_settings(&settings)?;
    let input = super::open_input(args.input.as_deref())?;

    let count = redact_lines(input, io::stdout().lock(), &redactor)?;
    tracing::debug!(lines = count, "redacted input");

    Ok(())
}

/// Command-line flags override the configured settings
fn settings(args: &RedactArgs, configured: &RedactionSettings) -> RedactionSettings {
    RedactionSettings {
        fields: if args.fields.is_empty() {
            configured.fields.clone()
        } else {
            args.fields.clone()
        },
        token: args.token.clone().unwrap_or_else(|| configured.token.clone()),
        separator: args
            .separator
            .clone()
            .unwrap_or_else(|| configured.separator.clone()),
    }
}

fn redact_lines(input: impl BufRead, mut output: impl Write, redactor: &Redactor) -> Result<usize> {
    let mut count = 0;
    for line in input.lines() {
        let line = line?;
        writeln!(output, "{}", redactor.redact(&line))?;
        count += 1;
    }
    output.flush()?;
    Ok(count)
}
