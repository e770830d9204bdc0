//! Exclusive advisory lock held across read-modify-write sequences.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use fs2::FileExt;

use crate::error::RsvpResult;

const LOCK_FILE: &str = ".lock";

/// Releases the lock when dropped.
pub struct StoreLock {
    _file: File,
}

/// Block until the store's lock is ours. Works across threads and processes.
pub fn acquire(root: &Path) -> RsvpResult<StoreLock> {
    fs::create_dir_all(root)?;

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(root.join(LOCK_FILE))?;

    file.lock_exclusive()?;

    Ok(StoreLock { _file: file })
}
