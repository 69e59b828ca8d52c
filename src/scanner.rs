use crate::classifier::{self, Reason, Verdict};
use crate::cleaner::{DeletionFailure, DeletionReport, ScanResult};
use crate::error::InputError;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Knobs for a scan. Built once by the caller and passed in.
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    /// Log every file's verdict at info level instead of debug.
    pub log_verdicts: bool,
    /// Classify files on the rayon pool. Result order is unaffected.
    pub parallel: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            log_verdicts: false,
            parallel: true,
        }
    }
}

/// An entry produced by the directory walk.
enum Found {
    File(PathBuf),
    /// Something the walk could not stat or open; recorded as junk.
    Unreachable(PathBuf),
}

pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walk `root` recursively and sort every regular file into good or junk.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, InputError> {
        check_root(root)?;

        let found = discover(root);
        tracing::debug!(root = %root.display(), files = found.len(), "walk finished");

        let judged: Vec<(PathBuf, Reason)> = if self.config.parallel {
            found.into_par_iter().map(|f| self.judge(f)).collect()
        } else {
            found.into_iter().map(|f| self.judge(f)).collect()
        };

        let mut result = ScanResult::default();
        for (path, reason) in judged {
            match reason.verdict() {
                Verdict::Good => result.good.push(path),
                Verdict::Junk => result.junk.push(path),
            }
        }
        Ok(result)
    }

    /// Remove each path independently. One failure never stops the rest.
    pub fn delete(&self, paths: &[PathBuf]) -> DeletionReport {
        let mut report = DeletionReport::default();

        for path in paths {
            match remove_file(path) {
                Ok(freed) => {
                    tracing::debug!(path = %path.display(), bytes = freed, "deleted");
                    report.bytes_freed += freed;
                    report.deleted.push(path.clone());
                }
                Err(error) => {
                    tracing::debug!(path = %path.display(), %error, "delete failed");
                    report.failures.push(DeletionFailure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    fn judge(&self, found: Found) -> (PathBuf, Reason) {
        let (path, reason) = match found {
            Found::File(path) => {
                let reason = classifier::explain(&path);
                (path, reason)
            }
            Found::Unreachable(path) => (path, Reason::Unreadable),
        };

        let verdict = reason.verdict();
        if self.config.log_verdicts {
            tracing::info!(path = %path.display(), %verdict, reason = reason.describe());
        } else {
            tracing::debug!(path = %path.display(), %verdict, reason = reason.describe());
        }
        (path, reason)
    }
}

fn check_root(root: &Path) -> Result<(), InputError> {
    let meta = match fs::metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(InputError::NotFound(root.to_path_buf()));
        }
        Err(source) => {
            return Err(InputError::Inaccessible {
                path: root.to_path_buf(),
                source,
            });
        }
    };

    if meta.is_dir() {
        Ok(())
    } else if meta.is_file() {
        Err(InputError::NotADirectory(root.to_path_buf()))
    } else {
        Err(InputError::NotFileOrDirectory(root.to_path_buf()))
    }
}

/// Collect regular files under `root`, sorted by name within each directory
/// so the order is stable for an unchanged tree.
fn discover(root: &Path) -> Vec<Found> {
    let mut found = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    found.push(Found::File(entry.into_path()));
                }
            }
            Err(err) => match err.path() {
                Some(path) => match walk_failure(path) {
                    Some(entry) => {
                        tracing::warn!(path = %path.display(), error = %err, "cannot stat entry, counting as junk");
                        found.push(entry);
                    }
                    None => {
                        tracing::warn!(path = %path.display(), error = %err, "skipping unreadable directory");
                    }
                },
                None => tracing::warn!(error = %err, "walk error"),
            },
        }
    }

    found
}

/// What a failed walk entry becomes. Directories are dropped; anything else
/// still gets a verdict.
fn walk_failure(path: &Path) -> Option<Found> {
    if is_dir(path) {
        None
    } else {
        Some(Found::Unreachable(path.to_path_buf()))
    }
}

fn is_dir(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Remove a single regular file. Returns bytes freed on success.
fn remove_file(path: &Path) -> io::Result<u64> {
    let size = fs::symlink_metadata(path).map(|m| m.len()).unwrap_or(0);
    fs::remove_file(path)?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    const PROSE: &str = "This paragraph is long enough and ends with a period.";

    fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// A tree hitting every rule at least once, nested a few levels deep.
    fn fixture() -> (TempDir, Vec<PathBuf>, Vec<PathBuf>) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let good = vec![
            write(root, "readme.txt", PROSE),
            write(root, "a/b/story.md", "Once upon a time!\nThere was a file."),
            write(root, "images/blank.png", ""),
            write(root, "a/archive.tar.gz", "x"),
        ];
        let junk = vec![
            write(root, "empty.txt", ""),
            write(root, "a/spaces.txt", "   \n\n  "),
            write(root, "a/b/word.txt", "ok"),
            write(root, "a/b/c/short.log", "one two three four\nfive"),
            write(root, "numbers.csv", "12345 678\n9999 8888 7777 6666 5555 4444 3333"),
        ];
        (tmp, good, junk)
    }

    fn scanner(parallel: bool) -> Scanner {
        Scanner::new(ScanConfig {
            log_verdicts: false,
            parallel,
        })
    }

    #[test]
    fn scan_partitions_every_file_once() {
        let (tmp, good, junk) = fixture();
        let result = scanner(true).scan(tmp.path()).unwrap();

        assert_eq!(result.total(), good.len() + junk.len());

        let good_set: HashSet<PathBuf> = result.good.iter().cloned().collect();
        let junk_set: HashSet<PathBuf> = result.junk.iter().cloned().collect();
        assert!(good_set.is_disjoint(&junk_set));
        assert_eq!(good_set, good.into_iter().collect::<HashSet<_>>());
        assert_eq!(junk_set, junk.into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn scan_order_is_stable_and_independent_of_parallelism() {
        let (tmp, _, _) = fixture();
        let first = scanner(true).scan(tmp.path()).unwrap();
        let second = scanner(true).scan(tmp.path()).unwrap();
        let sequential = scanner(false).scan(tmp.path()).unwrap();

        assert_eq!(first.good, second.good);
        assert_eq!(first.junk, second.junk);
        assert_eq!(first.good, sequential.good);
        assert_eq!(first.junk, sequential.junk);
    }

    #[test]
    fn scan_skips_directories_themselves() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("x/y/z")).unwrap();
        let result = scanner(false).scan(tmp.path()).unwrap();
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn scan_rejects_a_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "single.txt", PROSE);
        let err = scanner(true).scan(&file).unwrap_err();
        assert!(matches!(err, InputError::NotADirectory(p) if p == file));
    }

    #[test]
    fn scan_rejects_a_missing_root() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = scanner(true).scan(&missing).unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn scan_rejects_a_device_root() {
        let err = scanner(true).scan(Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, InputError::NotFileOrDirectory(p) if p == Path::new("/dev/null")));
    }

    #[test]
    fn failed_walk_entries_are_junk_unless_directories() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("vanished.txt");

        let entry = walk_failure(&missing).unwrap();
        assert!(matches!(&entry, Found::Unreachable(p) if *p == missing));
        let (path, reason) = scanner(false).judge(entry);
        assert_eq!(path, missing);
        assert_eq!(reason.verdict(), Verdict::Junk);

        assert!(walk_failure(tmp.path()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let visible = write(tmp.path(), "top.txt", PROSE);
        write(tmp.path(), "locked/inner.txt", "");
        let locked = tmp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores directory permissions.
        let enforced = fs::read_dir(&locked).is_err();
        let result = enforced.then(|| scanner(true).scan(tmp.path()));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if let Some(result) = result {
            let result = result.unwrap();
            assert_eq!(result.good, vec![visible]);
            assert!(result.junk.is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn scan_does_not_follow_symlinks() {
        let tmp = TempDir::new().unwrap();
        let target = write(tmp.path(), "real/notes.txt", PROSE);
        std::os::unix::fs::symlink(&target, tmp.path().join("link.txt")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("linkdir")).unwrap();

        let result = scanner(true).scan(tmp.path()).unwrap();
        assert_eq!(result.good, vec![target]);
        assert!(result.junk.is_empty());
    }

    #[test]
    fn delete_continues_past_failures() {
        let tmp = TempDir::new().unwrap();
        let a = write(tmp.path(), "a.txt", "12345");
        let b = tmp.path().join("already-gone.txt");
        let c = write(tmp.path(), "c.txt", "");
        let dir = tmp.path().join("subdir");
        fs::create_dir(&dir).unwrap();

        let report = scanner(true).delete(&[a.clone(), b.clone(), c.clone(), dir.clone()]);

        assert_eq!(report.deleted, vec![a.clone(), c.clone()]);
        assert_eq!(report.bytes_freed, 5);
        assert_eq!(report.failed_count(), 2);
        assert!(!report.is_clean());
        assert_eq!(report.failures[0].path, b);
        assert_eq!(report.failures[0].error.kind(), io::ErrorKind::NotFound);
        assert_eq!(report.failures[1].path, dir);
        assert!(!a.exists());
        assert!(!c.exists());
        assert!(dir.exists());
    }

    #[test]
    fn scan_then_delete_leaves_only_good_files() {
        let (tmp, good, junk) = fixture();
        let scanner = scanner(true);
        let result = scanner.scan(tmp.path()).unwrap();
        let report = scanner.delete(&result.junk);

        assert!(report.is_clean());
        assert_eq!(report.deleted_count(), junk.len());
        assert!(junk.iter().all(|p| !p.exists()));
        assert!(good.iter().all(|p| p.exists()));

        let rescan = scanner.scan(tmp.path()).unwrap();
        assert!(rescan.junk.is_empty());
        assert_eq!(rescan.good.len(), good.len());
    }
}
