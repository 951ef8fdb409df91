/// Error types for header parsing, crop bounds and batch processing.
use std::path::PathBuf;
use thiserror::Error;

/// Malformed PLY input. Fatal for the file it was raised on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unable to read .ply file header: no `end_header` line in the first 10 KiB")]
    MissingHeaderTerminator,
    #[error("could not find vertex count in header")]
    MissingVertexCount,
}

/// Invalid `minX,maxX,minY,maxY,minZ,maxZ` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundsError {
    #[error("expected 6 values, got {0}")]
    WrongValueCount(usize),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

#[derive(Debug, Error)]
pub enum CropError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("invalid crop bounds format: {0}")]
    Bounds(#[from] BoundsError),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("source directory does not exist: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("no files matching `{pattern}` found in {}", .dir.display())]
    NoInputFiles { dir: PathBuf, pattern: String },
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    #[error("failed to serialize batch report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CropError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
