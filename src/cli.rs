//! Command-line arguments for the `nora` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::logging::LogFormat;

/// Derive today's shared nonces from a password.
///
/// Both parties run the same command with the same password (and salt, if any);
/// one of them passes `-b`. Nonces change every UTC day.
#[derive(Parser, Debug)]
#[command(name = "nora", version, about)]
pub struct NoraCli {
    /// Shared password.
    #[arg(short = 'p', long, env = "NORA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Number of nonces to generate.
    #[arg(short = 'n', long = "count", default_value_t = 1)]
    pub count: usize,

    /// Length of each nonce in bytes.
    #[arg(short = 'l', long = "length", default_value_t = nora::DEFAULT_NONCE_LEN)]
    pub length: usize,

    /// Save each nonce to a file named `n-<index>`.
    #[arg(short = 's', long = "save")]
    pub save: bool,

    /// Derive the Party B stream.
    #[arg(short = 'b', long = "party-b")]
    pub party_b: bool,

    /// Salt for PBKDF2; without it the seed is a single SHA-256 pass.
    #[arg(long, env = "NORA_SALT", hide_env_values = true)]
    pub salt: Option<String>,

    /// Use this day (YYYYMMDD) instead of today's UTC date.
    #[arg(long, value_name = "YYYYMMDD")]
    pub date: Option<String>,

    /// Directory for saved nonces. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// How nonces are printed on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level used when `RUST_LOG` is unset.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log output format (logs go to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<index>: <nonce> <date>`
    Text,
    /// One JSON object per line.
    Json,
}

pub const USAGE: &str = "Usage: nora -p <password> [--salt <salt>] [-b] [-n <count>] [-l <length>] [-s]";

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        NoraCli::command().debug_assert();
    }

    #[test]
    fn short_flags() {
        let cli = NoraCli::try_parse_from([
            "nora", "-p", "secret", "-n", "3", "-l", "8", "-s", "-b", "--salt", "pepper",
        ])
        .expect("parse");
        assert_eq!(cli.password.as_deref(), Some("secret"));
        assert_eq!(cli.count, 3);
        assert_eq!(cli.length, 8);
        assert!(cli.save);
        assert!(cli.party_b);
        assert_eq!(cli.salt.as_deref(), Some("pepper"));
    }

    #[test]
    fn defaults() {
        let cli = NoraCli::try_parse_from(["nora", "-p", "secret"]).expect("parse");
        assert_eq!(cli.count, 1);
        assert_eq!(cli.length, 16);
        assert!(!cli.save);
        assert!(!cli.party_b);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn json_format_and_date_override() {
        let cli = NoraCli::try_parse_from([
            "nora", "-p", "secret", "--format", "json", "--date", "20240615",
        ])
        .expect("parse");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.date.as_deref(), Some("20240615"));
    }
}
