use std::path::Path;

const SIZE_UNITS: &[(u64, &str)] = &[(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];

/// Bytes freed, as shown in the deletion summary ("1.50 KB", "512 B").
pub fn format_size(bytes: u64) -> String {
    SIZE_UNITS
        .iter()
        .find(|(scale, _)| bytes >= *scale)
        .map(|(scale, unit)| format!("{:.2} {unit}", bytes as f64 / *scale as f64))
        .unwrap_or_else(|| format!("{bytes} B"))
}

/// Shorten a path for display by replacing home dir with ~.
pub fn display_path(path: &Path) -> String {
    match dirs::home_dir() {
        Some(home) => match path.strip_prefix(&home) {
            Ok(relative) => format!("~/{}", relative.display()),
            Err(_) => path.display().to_string(),
        },
        None => path.display().to_string(),
    }
}
