use std::path::PathBuf;
use thiserror::Error;

/// Problems with the scan root. These end the run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input path {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("input must be a directory: {} is a file", .0.display())]
    NotADirectory(PathBuf),

    #[error("{} is neither a file nor a directory", .0.display())]
    NotFileOrDirectory(PathBuf),

    #[error("cannot access {}: {source}", path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
