//! CLI argument parsing via `clap`.

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(
    name = "kbsize",
    version,
    about = "Report oversized knowledge-base files",
    long_about = "kbsize — walk a directory, count lines in matching files, keep the largest file per group, and bucket each group by size.\n\nConfiguration precedence: CLI > kbsize.toml > defaults.",
    after_help = "Examples:\n  kbsize\n  kbsize --root agents --suffix -knowledge.md\n  kbsize --depth 1 --output json"
)]
/// Top-level CLI options. Every flag is optional; a bare `kbsize` run
/// reports on the working directory.
pub struct Cli {
    #[arg(long, help = "Root directory to scan (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "File name suffix to match (default: .md)")]
    pub suffix: Option<String>,
    #[arg(long, help = "Ancestor levels above a file that name its group (default: 2)")]
    pub depth: Option<usize>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Path to a kbsize.toml|yaml config file")]
    pub config: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, help = "Disable colored output")]
    pub no_color: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_is_valid() {
        let cli = Cli::try_parse_from(["kbsize"]).unwrap();
        assert!(cli.root.is_none());
        assert!(!cli.no_color);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "kbsize",
            "--root",
            "agents",
            "--suffix",
            "-knowledge.md",
            "--depth",
            "3",
            "--output",
            "json",
            "--no-color",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.root.as_deref(), Some("agents"));
        assert_eq!(cli.suffix.as_deref(), Some("-knowledge.md"));
        assert_eq!(cli.depth, Some(3));
        assert_eq!(cli.output.as_deref(), Some("json"));
        assert!(cli.no_color);
        assert_eq!(cli.verbose, 2);
    }
}
