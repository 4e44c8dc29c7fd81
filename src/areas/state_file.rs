//! Locked whole-file reads and writes for the JSON state files
//!
//! Reads hold a shared advisory lock and writes an exclusive one, so a reader
//! never observes a half-written file. This does not make a read-modify-write
//! cycle atomic: two commands updating the same file concurrently still race
//! and the last writer wins.

use anyhow::Context;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Read the whole file, or `None` if it does not exist.
///
/// Content is returned as raw bytes; decoding is left to the caller.
pub(crate) fn read_locked(path: &Path) -> anyhow::Result<Option<Vec<u8>>> {
    let mut state_file = match std::fs::OpenOptions::new().read(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context(format!("Unable to open {}", path.display())),
    };

    let mut lock = file_guard::lock(&mut state_file, file_guard::Lock::Shared, 0, 1)
        .context(format!("Unable to lock {}", path.display()))?;
    let file: &mut File = &mut lock;

    let mut content = Vec::new();
    file.read_to_end(&mut content)
        .context(format!("Unable to read {}", path.display()))?;

    Ok(Some(content))
}

/// Replace the whole file content.
pub(crate) fn write_locked(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let mut state_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .context(format!("Unable to open {}", path.display()))?;

    let mut lock = file_guard::lock(&mut state_file, file_guard::Lock::Exclusive, 0, 1)
        .context(format!("Unable to lock {}", path.display()))?;
    let file: &mut File = &mut lock;

    // truncate only once the lock is held
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(content)
        .context(format!("Unable to write {}", path.display()))?;
    file.sync_data()?;

    Ok(())
}
