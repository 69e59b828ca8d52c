use clap::Parser;
use junksweep::ScanConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "junksweep",
    about = "Find empty and content-free text files under a directory and optionally delete them",
    version
)]
pub struct Cli {
    /// Directory to scan recursively
    pub path: PathBuf,

    /// Log every file's verdict as it is computed
    #[arg(short, long, env = "JUNKSWEEP_VERBOSE")]
    pub verbose: bool,

    /// Delete junk files without asking
    #[arg(short, long, conflicts_with = "dry_run")]
    pub yes: bool,

    /// Report counts only. Never prompts, never deletes.
    #[arg(long)]
    pub dry_run: bool,

    /// Print every junk file path
    #[arg(long)]
    pub list: bool,

    /// Classify files one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

impl Cli {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            log_verdicts: self.verbose,
            parallel: !self.sequential,
        }
    }
}
