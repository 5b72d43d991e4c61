use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a laid-out document into a saved file.
///
/// Layout itself cannot fail; only serialization and the write can.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ExportResult<T> = Result<T, ExportError>;
