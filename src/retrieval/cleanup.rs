use std::path::Path;
use walkdir::WalkDir;

/// Suffix `wget --convert-links` gives the pre-conversion copies it keeps
const BACKUP_SUFFIX: &str = ".orig";

/// Deletes every `*.orig` file below `dir`
///
/// Unreadable entries and failed deletions are logged and skipped.
/// Returns the number of files removed.
pub fn remove_backup_files(dir: &Path) -> usize {
    let mut removed = 0;

    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable archive entry: {}", e);
                continue;
            }
        };

        let is_backup = entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(BACKUP_SUFFIX));

        if !is_backup {
            continue;
        }

        match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!("Could not remove {}: {}", entry.path().display(), e),
        }
    }

    removed
}
