use std::fs;
use std::path::{Path, PathBuf};

use ipmd5_common::config::Config;
use tempfile::TempDir;

/// A scratch directory holding a source file and a destination path.
pub struct Workspace {
    pub dir: TempDir,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Workspace {
    pub fn with_source(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("hashes.txt");
        let destination = dir.path().join("found.txt");
        fs::write(&source, contents).unwrap();

        Self {
            dir,
            source,
            destination,
        }
    }

    pub fn config(&self) -> Config {
        Config::new(&self.source, &self.destination)
    }

    pub fn output(&self) -> String {
        read(&self.destination)
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

pub fn sorted_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
    lines.sort_unstable();
    lines
}
