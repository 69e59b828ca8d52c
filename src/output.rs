use colored::Colorize;
use std::io::{BufRead, Write};

pub fn print_banner() {
    println!(
        "{}",
        concat!("junksweep - junk file finder v", env!("CARGO_PKG_VERSION"))
            .bold()
            .cyan()
    );
    println!();
}

pub fn print_scan_header(root: &str) {
    println!("{}", format!("=== Scanning {root} ===").bold().white());
}

pub fn print_junk_entry(path: &str) {
    println!("  {}", path.dimmed());
}

pub fn print_counts(good: usize, junk: usize) {
    println!(
        "Found {} good files and {} junk files",
        good.to_string().green().bold(),
        junk.to_string().yellow().bold()
    );
    println!();
}

/// Ask a yes/no question and read one answer line from `input`.
/// Only "y" (any case, surrounding whitespace ignored) is yes; EOF is no.
pub fn confirm(prompt: &str, input: &mut impl BufRead) -> std::io::Result<bool> {
    print!("{} ", prompt.bold());
    std::io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg.red());
}

pub fn print_info(msg: &str) {
    println!("{} {}", "Info:".cyan().bold(), msg);
}

pub fn print_dry_run_footer() {
    println!(
        "{}",
        "This was a dry run. Run again without --dry-run to delete."
            .yellow()
            .bold()
    );
}

pub fn print_not_deleted() {
    println!("{}", "Junk files not deleted".yellow());
}

pub fn print_deleted(path: &str) {
    println!("  {} {}", "Deleted".red(), path.dimmed());
}

pub fn print_delete_error(path: &str, err: &str) {
    println!(
        "  {} {}: {}",
        "Failed".red().bold(),
        path.dimmed(),
        err.red()
    );
}

pub fn print_delete_summary(deleted: usize, failed: usize, freed: &str) {
    println!();
    println!(
        "{} {}",
        format!("{deleted} files deleted").green().bold(),
        format!("({freed} freed)").green()
    );
    if failed > 0 {
        println!("{}", format!("{failed} files could not be deleted").red());
    }
}
