use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Unique store path under the system temp dir, removed on drop.
pub struct TempStore {
    path: PathBuf,
}

impl TempStore {
    pub fn new() -> Self {
        let dir = env::temp_dir().join(format!("skipmap-{}", uuid::Uuid::new_v4()));
        Self {
            path: dir.join("dumpFile"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        if let Some(dir) = self.path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
