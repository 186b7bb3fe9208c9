use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::error::FazelError;
use super::format::render;
use crate::pointing::CorrectedSample;

pub fn write_to<W: Write>(
    writer: &mut W,
    header: &str,
    corrected: &[CorrectedSample],
) -> Result<(), FazelError> {
    let text = render(header, corrected)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes a pointing file, replacing `path` only once every line is on disk.
///
/// The content goes to a temporary file next to `path` that is renamed over
/// it at the end. On failure `path` is left untouched and the temporary file
/// is removed.
pub fn write_file(
    path: &Path,
    header: &str,
    corrected: &[CorrectedSample],
) -> Result<(), FazelError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_to(&mut tmp, header, corrected)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| FazelError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;

    log::debug!("Wrote {} pointings to {}", corrected.len(), path.display());
    Ok(())
}
