//! No-clobber writer for fetched bodies.

use std::io::{ErrorKind, Write};

use super::{OutputDir, PersistOutcome, TEMP_PREFIX, TEMP_SUFFIX};
use crate::error::FetchError;

/// Writes `bytes` to `dir/filename` unless a file with that name exists.
///
/// The existence check runs first so a collision costs no disk I/O. The final
/// link is itself no-clobber, so if another worker publishes the same name in
/// between, this call still reports `Collision` and its temp file is removed.
pub fn persist(dir: &OutputDir, filename: &str, bytes: &[u8]) -> Result<PersistOutcome, FetchError> {
    let final_path = dir.join(filename);

    let exists = final_path
        .try_exists()
        .map_err(|e| FetchError::storage(&final_path, e))?;
    if exists {
        return Ok(PersistOutcome::Collision(final_path));
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir.path())
        .map_err(|e| FetchError::storage(dir.path(), e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| FetchError::storage(tmp.path(), e))?;

    match tmp.persist_noclobber(&final_path) {
        Ok(_) => Ok(PersistOutcome::Written(final_path)),
        // Dropping `e.file` deletes the temp file.
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            Ok(PersistOutcome::Collision(final_path))
        }
        Err(e) => Err(FetchError::storage(&final_path, e.error)),
    }
}
