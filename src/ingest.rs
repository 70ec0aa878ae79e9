//! Reading track archives from disk.

use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{IngestError, SourceContext};
use crate::formats::{Adapter, Format, Ingested, ParseOptions, TrackFormat};

/// Parse one file in the given format.
///
/// A missing file is [`IngestError::MissingFile`]; any other read failure is
/// [`IngestError::Unreadable`]. Lines the adapter cannot read end up in
/// [`Ingested::malformed`].
pub fn ingest_file(
    path: impl AsRef<Path>,
    format: Format,
    options: ParseOptions,
) -> Result<Ingested, IngestError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => IngestError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => IngestError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let name = path.display().to_string();
    crate::log::debug!(path = %name, %format, bytes = text.len(), "ingesting");
    Ok(Adapter::new(format, options).parse_source(&SourceContext::new(&name, &text)))
}

/// Parse several files independently; one failing source does not affect
/// the others. Results are in input order.
pub fn ingest_batch(
    sources: &[(PathBuf, Format)],
    options: ParseOptions,
) -> Vec<Result<Ingested, IngestError>> {
    sources
        .iter()
        .map(|(path, format)| {
            let result = ingest_file(path, *format, options);
            if let Err(error) = &result {
                crate::log::warn!(path = %path.display(), %error, "source failed");
            }
            result
        })
        .collect()
}
