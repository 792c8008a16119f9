#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Per-test directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    dir: PathBuf,
}

impl ScratchDir {
    pub fn new(test: &str) -> Self {
        let name = format!("entroscan-{}-{}", std::process::id(), test);
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        ScratchDir { dir }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

pub const TWO_GROUPS: &str = "\
0.0,0.0
0.1,0.0
0.0,0.1
0.1,0.1
0.05,0.05
10.0,0.0
10.1,0.0
10.0,0.1
10.1,0.1
10.05,0.05
-50.0,0.0
60.0,0.0
";
