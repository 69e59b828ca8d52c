mod cli;
mod output;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use junksweep::{logging, utils, Scanner};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    output::print_banner();
    output::print_scan_header(&utils::display_path(&cli.path));

    let scanner = Scanner::new(cli.scan_config());
    let result = scanner.scan(&cli.path)?;
    tracing::debug!(files = result.total(), "scan finished");

    if cli.list {
        for path in &result.junk {
            output::print_junk_entry(&utils::display_path(path));
        }
        if !result.junk.is_empty() {
            println!();
        }
    }
    output::print_counts(result.good.len(), result.junk.len());

    if result.junk.is_empty() {
        output::print_info("Nothing to delete.");
        return Ok(());
    }
    if cli.dry_run {
        output::print_dry_run_footer();
        return Ok(());
    }

    let proceed = cli.yes
        || output::confirm(
            "Do you want to delete the junk files? (y/n):",
            &mut std::io::stdin().lock(),
        )
        .context("failed to read answer from stdin")?;
    if !proceed {
        output::print_not_deleted();
        return Ok(());
    }

    let report = scanner.delete(&result.junk);
    for failure in &report.failures {
        output::print_delete_error(
            &utils::display_path(&failure.path),
            &failure.error.to_string(),
        );
    }
    if cli.list {
        for path in &report.deleted {
            output::print_deleted(&utils::display_path(path));
        }
    }
    output::print_delete_summary(
        report.deleted_count(),
        report.failed_count(),
        &utils::format_size(report.bytes_freed),
    );
    Ok(())
}
