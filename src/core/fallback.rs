/// Modification-time fallback for date searches
///
/// Used when no note carries a matching `created:` line. Walks the vault and
/// keeps note files last modified inside the requested days.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

/// Find notes modified in `[start, end + 1 day)`, local time
///
/// `end` is a whole day, so the window runs to the following midnight.
/// Paths come back relative to `root` with `/` separators, sorted by
/// name so repeated runs agree. Unreadable entries are skipped.
pub fn modified_between(root: &Path, extension: &str, start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let window_start = start.and_hms_opt(0, 0, 0);
    let window_end = end
        .checked_add_days(Days::new(1))
        .and_then(|d| d.and_hms_opt(0, 0, 0));

    let (Some(window_start), Some(window_end)) = (window_start, window_end) else {
        return Vec::new();
    };

    let mut results = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable vault entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }

        let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) else {
            continue;
        };

        let modified = local_naive(modified);
        if modified >= window_start && modified < window_end {
            if let Ok(relative) = entry.path().strip_prefix(root) {
                results.push(relative_string(relative));
            }
        }
    }

    debug!(root = %root.display(), %start, %end, hits = results.len(), "mtime fallback finished");
    results
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

fn local_naive(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

fn relative_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn set_mtime(path: &Path, y: i32, m: u32, d: u32, hour: u32) {
        let local = Local
            .with_ymd_and_hms(y, m, d, hour, 0, 0)
            .single()
            .unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::from(local)).unwrap();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vault() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("daily")).unwrap();
        for name in ["daily/a.md", "b.md", "c.md", "image.png"] {
            fs::write(temp.path().join(name), "x").unwrap();
        }
        set_mtime(&temp.path().join("daily/a.md"), 2024, 3, 15, 9);
        set_mtime(&temp.path().join("b.md"), 2024, 3, 17, 23);
        set_mtime(&temp.path().join("c.md"), 2024, 1, 2, 12);
        set_mtime(&temp.path().join("image.png"), 2024, 3, 15, 9);
        temp
    }

    #[test]
    fn test_range_includes_whole_end_day() {
        let temp = vault();
        let hits = modified_between(temp.path(), "md", date(2024, 3, 10), date(2024, 3, 17));
        assert_eq!(hits, vec!["b.md", "daily/a.md"]);
    }

    #[test]
    fn test_single_day() {
        let temp = vault();
        let hits = modified_between(temp.path(), "md", date(2024, 3, 15), date(2024, 3, 15));
        assert_eq!(hits, vec!["daily/a.md"]);
    }

    #[test]
    fn test_excludes_following_day_and_other_extensions() {
        let temp = vault();
        let hits = modified_between(temp.path(), "md", date(2024, 3, 16), date(2024, 3, 16));
        assert!(hits.is_empty());

        let pngs = modified_between(temp.path(), "png", date(2024, 3, 15), date(2024, 3, 15));
        assert_eq!(pngs, vec!["image.png"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let hits = modified_between(&temp.path().join("gone"), "md", date(2024, 1, 1), date(2024, 1, 2));
        assert!(hits.is_empty());
    }
}
