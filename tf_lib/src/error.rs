//! Error types for tf_lib.

use std::path::PathBuf;

use thiserror::Error;

use crate::{registry::CurveId, transfer::PointHandle};

pub type TfResult<T> = Result<T, TfError>;

/// Errors reported by curves, the library and the registry
#[derive(Debug, Error)]
pub enum TfError {
    /// Curve has no point with this handle
    #[error("point not found: {0}")]
    PointNotFound(PointHandle),

    /// Registry has no curve with this id
    #[error("curve not registered: {0}")]
    CurveNotFound(CurveId),

    /// No stored transfer function under this path
    #[error("transfer function not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Saving would overwrite an existing file
    #[error("transfer function already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Document is well formed XML, but not a transfer function
    #[error("malformed transfer function: {0}")]
    Format(String),

    /// Imported data breaks curve invariants
    #[error("invalid curve: {0}")]
    InvalidCurve(String),
}
