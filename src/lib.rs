//! Find junk text files: empty, near-empty, or free of any prose.
//!
//! [`scanner::Scanner`] walks a directory and sorts every regular file into
//! good or junk using [`classifier::classify`], then can delete the junk set
//! one file at a time.

pub mod classifier;
pub mod cleaner;
pub mod error;
pub mod logging;
pub mod scanner;
pub mod utils;

pub use classifier::{classify, Verdict};
pub use cleaner::{DeletionReport, ScanResult};
pub use error::InputError;
pub use scanner::{ScanConfig, Scanner};
