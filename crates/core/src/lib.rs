//! umlscope: recover a class-structure model from source text and render it
//! as a PlantUML class diagram.
//!
//! Recognition is lexical (regexes and brace counting), not a compiler front
//! end: it tolerates arbitrary, only-approximately-valid input and degrades to
//! a partial model instead of failing.
//!
//! # Modules
//!
//! - [`comments`]: Comment stripping ahead of any structural scan
//! - [`scanner`]: Type declaration headers and extends/implements clauses
//! - [`body`]: Brace-matched body extraction
//! - [`members`]: Top-level member fragment splitting
//! - [`signature`]: Field and method signature parsing
//! - [`extract`]: Per-file pipeline and last-write-wins registry build
//! - [`resolve`]: Internal/external classification of supertype references
//! - [`render`]: PlantUML document rendering and sinks
//! - [`scan`]: Source file discovery
//! - [`types`]: Core types shared across the crate

pub mod body;
pub mod comments;
pub mod extract;
pub mod members;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod scanner;
pub mod signature;
pub mod types;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use types::*;

// ---------------------------------------------------------------------------
// .umlscope.toml config loading
// ---------------------------------------------------------------------------

/// Name of the per-project config file.
pub const CONFIG_FILE: &str = ".umlscope.toml";

/// Known keys in `.umlscope.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["scan_dirs", "skip_dirs", "extensions", "output", "skinparams"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn string_list(value: &toml::Value) -> Option<Vec<String>> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(|v| v.as_str().map(|s| s.to_string())).collect())
}

/// Load configuration from `.umlscope.toml` in the given project root.
///
/// Returns a [`ScanConfig`] with defaults merged with any overrides from the config file.
/// If the file doesn't exist or can't be parsed, returns defaults with a warning.
/// Unknown keys trigger a warning with a typo suggestion.
pub fn load_umlscope_config(project_root: &Path) -> ScanConfig {
    let mut config = ScanConfig::new(project_root.to_path_buf());
    let config_path = project_root.join(CONFIG_FILE);

    if !config_path.exists() {
        return config;
    }

    debug!("Loading {CONFIG_FILE}");
    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Could not read {CONFIG_FILE}, using defaults");
            return config;
        }
    };
    let table = match content.parse::<toml::Table>() {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Failed to parse {CONFIG_FILE}, using defaults");
            return config;
        }
    };

    // Warn on unknown keys
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS
            .iter()
            .min_by_key(|k| edit_distance(key, k))
            .copied()
            .unwrap_or_default();
        if edit_distance(key, suggestion) <= 3 {
            warn!(
                key = key.as_str(),
                suggestion,
                "Unknown key in {CONFIG_FILE}, did you mean '{suggestion}'?"
            );
        } else {
            warn!(
                key = key.as_str(),
                "Unknown key in {CONFIG_FILE} (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            );
        }
    }

    if let Some(dirs) = table.get("scan_dirs").and_then(string_list) {
        config.scan_dirs = dirs;
    }

    // skip_dirs merge with defaults
    if let Some(dirs) = table.get("skip_dirs").and_then(string_list) {
        config.skip_dirs.extend(dirs);
    }

    if let Some(exts) = table.get("extensions").and_then(string_list) {
        config.extensions =
            exts.into_iter().map(|e| e.trim_start_matches('.').to_string()).collect();
    }

    if let Some(output) = table.get("output").and_then(|v| v.as_str()) {
        config.output = PathBuf::from(output);
    }

    if let Some(params) = table.get("skinparams").and_then(string_list) {
        config.skinparams = params;
    }

    config
}

// ---------------------------------------------------------------------------
// Whole-project extraction
// ---------------------------------------------------------------------------

/// Discover, read and extract every source file of a project.
pub fn extract_project(config: &ScanConfig) -> TypeRegistry {
    info!(root = %config.root.display(), "Scanning sources");
    if !config.scan_dirs.is_empty() {
        debug!(dirs = ?config.scan_dirs, "Scan dirs");
    }

    let start = Instant::now();
    let files = scan::discover_sources(config);
    let registry = extract::build_registry(&files);

    info!(
        files = files.len(),
        types = registry.len(),
        externals = resolve::external_types(&registry).len(),
        time_ms = start.elapsed().as_millis() as u64,
        "Scan complete"
    );
    registry
}

/// Extract a project and render its diagram with the configured options.
pub fn generate_diagram(config: &ScanConfig) -> String {
    let registry = extract_project(config);
    render::render_plantuml(&registry, &render::RenderOptions::from_config(config))
}
