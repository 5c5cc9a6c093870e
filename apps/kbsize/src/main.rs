//! kbsize CLI binary entry point.
//! Resolves configuration, runs the aggregation, and prints the report.

use clap::Parser;
use kbsize::cli::Cli;
use kbsize::{aggregate, config, output, utils};
use std::path::Path;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .target(env_logger::Target::Stderr)
        .init();
}

fn fail(msg: impl std::fmt::Display, color: bool) -> ! {
    eprintln!("{} {}", utils::error_prefix(color), msg);
    std::process::exit(2);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let color = utils::colors_enabled(cli.no_color);

    let cwd = match std::env::current_dir() {
        Ok(d) => d,
        Err(e) => fail(format!("cannot determine working directory: {}", e), color),
    };
    let eff = match config::resolve_effective(
        &cwd,
        cli.config.as_deref().map(Path::new),
        cli.root.as_deref(),
        cli.suffix.as_deref(),
        cli.depth,
        cli.output.as_deref(),
    ) {
        Ok(eff) => eff,
        Err(e) => fail(e, color),
    };
    match eff.config_path.as_ref() {
        Some(p) => log::info!("using config {}", p.display()),
        None => eprintln!(
            "{} No kbsize.toml found; using defaults.",
            utils::note_prefix(color)
        ),
    }
    log::info!(
        "scanning {} for *{} (group depth {})",
        eff.root.display(),
        eff.suffix,
        eff.depth
    );

    let report = match aggregate::run_report(&eff) {
        Ok(r) => r,
        Err(e) => fail(e, color),
    };
    if report.summary.groups == 0 {
        eprintln!(
            "{} No files matching *{} under {}",
            utils::info_prefix(color),
            eff.suffix,
            eff.root.display()
        );
    }
    if let Err(e) = output::print_report(&report, eff.output, color) {
        fail(e, color);
    }
}
