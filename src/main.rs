mod cli;
mod logging;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use nora::{DateTag, NonceGeneratorBuilder, NonceWriter, PartyRole, SystemClock};
use tracing::warn;

use crate::cli::{NoraCli, OutputFormat, USAGE};

fn main() -> ExitCode {
    let cli = NoraCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: NoraCli) -> anyhow::Result<ExitCode> {
    let password = match cli.password.filter(|p| !p.is_empty()) {
        Some(p) => p,
        None => {
            eprintln!("{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    let date_tag = match cli.date.as_deref() {
        Some(tag) => DateTag::parse(tag)?,
        None => DateTag::today(&SystemClock).context("failed to read the current date")?,
    };

    let mut builder = NonceGeneratorBuilder::default()
        .password(password)
        .date_tag(date_tag)
        .role(PartyRole::from_is_party_b(cli.party_b))
        .nonce_length(cli.length)
        .count(cli.count);
    if let Some(salt) = cli.salt {
        builder = builder.salt(salt);
    }
    let generator = builder.build_validated()?;

    let writer = if cli.save {
        Some(NonceWriter::new(resolve_out_dir(cli.out_dir)?))
    } else {
        None
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for item in generator.records()? {
        let record = item.context("failed to generate nonce")?;
        match cli.format {
            OutputFormat::Text => writeln!(out, "{record}")?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&record)?)?,
        }
        out.flush()?;

        if let Some(writer) = &writer {
            if let Err(err) = writer.write(&record) {
                if !err.is_recoverable() {
                    return Err(err).context("failed to save nonce");
                }
                warn!(index = record.index, error = %err, "failed to save nonce");
                eprintln!("Failed to write nonce to file: {err}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn resolve_out_dir(out_dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match out_dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}
