//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles
//! on the presenter crates:
//! - No sleep() calls outside animation duration timers
//! - No UI framework dependencies in the core
//!
//! The helpers here walk production sources and strip test modules and
//! comments so each test only has to express its own rule.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, resolved from this package's manifest directory
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Production source directories checked by every rule
#[must_use]
pub fn production_dirs() -> Vec<PathBuf> {
    vec![workspace_root().join("presenter/core/src")]
}

/// A single line of production code
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// File the line belongs to
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Full line text
    pub text: String,
    /// Line text with any trailing `//` comment removed
    pub code: String,
}

impl SourceLine {
    /// Format as `path:line - text` for violation reports
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}:{} - {}", self.path.display(), self.number, self.text.trim())
    }
}

/// All `.rs` files under `dir`
#[must_use]
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Production lines of a file
///
/// Everything from the first `#[cfg(test)]` on is test code and skipped,
/// as are doc comments (doctests live there).
#[must_use]
pub fn production_lines(path: &Path) -> Vec<SourceLine> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter(|(_, line)| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("///") && !trimmed.starts_with("//!")
        })
        .map(|(idx, line)| SourceLine {
            path: path.to_path_buf(),
            number: idx + 1,
            text: line.to_string(),
            code: line.split("//").next().unwrap_or(line).to_string(),
        })
        .collect()
}

/// Production lines of every Rust file under the production directories
#[must_use]
pub fn all_production_lines() -> Vec<SourceLine> {
    let mut lines = Vec::new();
    for dir in production_dirs() {
        assert!(dir.exists(), "Missing production directory: {}", dir.display());
        for file in rust_files(&dir) {
            lines.extend(production_lines(&file));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_dirs_exist() {
        for dir in production_dirs() {
            assert!(dir.exists(), "{}", dir.display());
            assert!(!rust_files(&dir).is_empty());
        }
    }

    #[test]
    fn test_test_modules_are_skipped() {
        let dir = std::env::temp_dir().join(format!("arch-enforce-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("sample.rs");
        fs::write(
            &file,
            "/// doc sleep(\nfn a() {} // trailing\n#[cfg(test)]\nmod tests {}\n",
        )
        .unwrap();

        let lines = production_lines(&file);
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 2);
        assert_eq!(lines[0].code.trim(), "fn a() {}");
    }
}
