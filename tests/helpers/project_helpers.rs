//! On-disk project fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use valence::ide::AnalysisHost;
use valence::project::{ScanOptions, StaticBuildConfig};

/// A temporary project directory and a host that has fully scanned it.
pub struct ProjectFixture {
    pub dir: TempDir,
    pub config: Arc<StaticBuildConfig>,
    pub host: AnalysisHost,
}

impl ProjectFixture {
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

pub fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (relative, text) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }
}

pub fn options(system_dirs: Vec<PathBuf>) -> ScanOptions {
    ScanOptions {
        batch_size: 2,
        system_dirs,
    }
}

/// Write `files` under a fresh recursive root and scan it to completion.
pub fn project(files: &[(&str, &str)]) -> ProjectFixture {
    project_with_system(files, Vec::new())
}

pub fn project_with_system(files: &[(&str, &str)], system_dirs: Vec<PathBuf>) -> ProjectFixture {
    let dir = TempDir::new().unwrap();
    write_files(dir.path(), files);

    let config = Arc::new(StaticBuildConfig::new().with_root(dir.path(), true));
    let mut host = AnalysisHost::with_options(config.clone(), options(system_dirs));
    host.open(dir.path());
    host.run_to_completion();
    ProjectFixture { dir, config, host }
}
