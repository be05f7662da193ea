//! Command-line interface parsing
//!
//! The tool takes no positional arguments; everything it needs comes from
//! the environment. The flags here only shape output and store placement.

use std::path::PathBuf;

use clap::Parser;

/// HTB Rank - daily-cached Hack The Box ranking metrics
#[derive(Parser, Debug)]
#[command(name = "htbrank")]
#[command(about = "Serves daily-cached Hack The Box profile and country ranking metrics")]
#[command(version)]
pub struct Cli {
    /// Pretty-print the JSON payload instead of compact output
    #[arg(long)]
    pub pretty: bool,

    /// Override the record store root directory
    ///
    /// Defaults to the XDG cache directory (~/.cache/htbrank on Linux).
    /// Records are kept in a subdirectory named by TABLE_NAME.
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["htbrank"]);
        assert!(!cli.pretty);
        assert!(cli.store_dir.is_none());
    }

    #[test]
    fn test_cli_parse_pretty_flag() {
        let cli = Cli::parse_from(["htbrank", "--pretty"]);
        assert!(cli.pretty);
    }

    #[test]
    fn test_cli_parse_store_dir() {
        let cli = Cli::parse_from(["htbrank", "--store-dir", "/tmp/htbrank-store"]);
        assert_eq!(
            cli.store_dir.as_deref(),
            Some(std::path::Path::new("/tmp/htbrank-store"))
        );
    }
}
