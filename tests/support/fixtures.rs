use std::fs;
use std::path::{Path, PathBuf};

pub fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(format!("{}.json", name));
    path
}

pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}

/// Copy a fixture into `dir` and return the copy's path.
pub fn install_fixture(dir: &Path, name: &str) -> PathBuf {
    let target = dir.join(format!("{}.json", name));
    fs::write(&target, load_fixture(name))
        .unwrap_or_else(|e| panic!("Failed to write fixture to {:?}: {}", target, e));
    target
}
