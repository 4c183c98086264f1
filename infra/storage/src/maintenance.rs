use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Marker embedded in the names of in-flight atomic writes.
pub(crate) const TMP_MARKER: &str = ".keeltmp.";

/// Temp files younger than this may still belong to a concurrent writer.
const STALE_AFTER: Duration = Duration::from_secs(300);

pub(crate) async fn purge_tmp(root: &Path) -> usize {
    let root = root.to_path_buf();
    let now = SystemTime::now();

    match tokio::task::spawn_blocking(move || remove_stale(&root, now, STALE_AFTER)).await {
        Ok((removed, failed)) => {
            if removed > 0 || failed > 0 {
                info!(removed, failed, "Cleaned up temporary files");
            }
            removed
        },
        Err(e) => {
            error!(error = %e, "Temp file cleanup task panicked");
            0
        },
    }
}

fn remove_stale(root: &Path, now: SystemTime, threshold: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    for entry in WalkDir::new(root).into_iter().flatten() {
        if !is_tmp(&entry) || !is_stale(&entry, now, threshold) {
            continue;
        }
        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Failed to remove temp file");
                failed += 1;
            },
        }
    }

    (removed, failed)
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_stale_temp_files_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join(format!("report.pdf{TMP_MARKER}7"));
        let keep = dir.path().join("report.pdf");
        std::fs::write(&tmp, b"partial").unwrap();
        std::fs::write(&keep, b"done").unwrap();

        let (removed, failed) = remove_stale(dir.path(), SystemTime::now(), Duration::from_secs(3600));
        assert_eq!((removed, failed), (0, 0), "fresh temp files survive");

        let later = SystemTime::now() + Duration::from_secs(7200);
        let (removed, failed) = remove_stale(dir.path(), later, Duration::from_secs(3600));
        assert_eq!((removed, failed), (1, 0));
        assert!(!tmp.exists());
        assert!(keep.exists());
    }
}
