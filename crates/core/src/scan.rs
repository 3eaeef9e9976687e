use crate::types::*;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Parallel file walking helper
// ---------------------------------------------------------------------------

/// Collect files matching an extension filter using parallel directory walk.
fn walk_files_parallel(
    project_root: &Path,
    scan_dirs: &[String],
    skip_dirs: &HashSet<String>,
    ext_filter: &HashSet<String>,
) -> Vec<(PathBuf, String)> {
    let results: Mutex<Vec<(PathBuf, String)>> = Mutex::new(Vec::new());

    let roots: Vec<PathBuf> = if scan_dirs.is_empty() {
        vec![project_root.to_path_buf()]
    } else {
        scan_dirs.iter().map(|d| project_root.join(d)).collect()
    };

    for dir in roots {
        if !dir.exists() {
            warn!(dir = %dir.display(), "Skipping scan dir (not found)");
            continue;
        }

        let skip = skip_dirs.clone();
        WalkBuilder::new(&dir)
            .hidden(true)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .threads(rayon::current_num_threads().min(12))
            .filter_entry(move |entry| {
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    let name = entry.file_name().to_string_lossy();
                    return !skip.contains(name.as_ref());
                }
                true
            })
            .build_parallel()
            .run(|| {
                Box::new(|entry| {
                    let entry = match entry {
                        Ok(e) => e,
                        Err(_) => return ignore::WalkState::Continue,
                    };
                    if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                        return ignore::WalkState::Continue;
                    }

                    let abs_path = entry.path().to_path_buf();
                    let ext_str = abs_path.extension().and_then(|e| e.to_str()).unwrap_or("");
                    if !ext_filter.is_empty() && !ext_filter.contains(ext_str) {
                        return ignore::WalkState::Continue;
                    }

                    let rel_path = abs_path
                        .strip_prefix(project_root)
                        .unwrap_or(&abs_path)
                        .to_string_lossy()
                        .replace('\\', "/");

                    if let Ok(mut guard) = results.lock() {
                        guard.push((abs_path, rel_path));
                    }
                    ignore::WalkState::Continue
                })
            });
    }

    results.into_inner().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Source discovery
// ---------------------------------------------------------------------------

/// Discover and read every source file under the configured scan dirs.
///
/// Files come back sorted by relative path so registry merging is
/// deterministic. Files that cannot be read as UTF-8 are skipped with a
/// warning.
pub fn discover_sources(config: &ScanConfig) -> Vec<SourceFile> {
    let mut paths =
        walk_files_parallel(&config.root, &config.scan_dirs, &config.skip_dirs, &config.extensions);
    paths.sort_by(|a, b| a.1.cmp(&b.1));
    paths.dedup_by(|a, b| a.1 == b.1);

    let files: Vec<SourceFile> = paths
        .par_iter()
        .filter_map(|(abs_path, rel_path)| match fs::read_to_string(abs_path) {
            Ok(text) => {
                debug!(path = rel_path.as_str(), bytes = text.len(), "Read source file");
                Some(SourceFile::new(rel_path.clone(), text))
            }
            Err(e) => {
                warn!(path = rel_path.as_str(), error = %e, "Could not read source file");
                None
            }
        })
        .collect();

    files
}
