//! Common test helpers for integration tests

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn orfs_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_orfs"))
}

/// Run the binary from `work_dir`, with `HOME` pointed there too so no
/// user-level config leaks into the run.
pub fn run_orfs(work_dir: &Path, args: &[&str]) -> Output {
    Command::new(orfs_binary())
        .args(args)
        .current_dir(work_dir)
        .env("HOME", work_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run orfs binary")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("orfs was terminated by a signal")
}
