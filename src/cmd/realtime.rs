//! `orfs realtime`: structure of a realtime feed.

use anyhow::Result;
use std::io;
use std::path::Path;

use orfs::realtime::check_realtime_file;

use crate::render;

/// Returns whether the feed passed.
pub fn cmd_realtime(file: &Path) -> Result<bool> {
    let report = check_realtime_file(file)?;
    render::realtime_report(&mut io::stdout().lock(), &super::origin(file), &report)?;
    Ok(report.passed)
}
