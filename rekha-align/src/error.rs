//! Error types for rekha-align

use crate::config::ConfigLoadError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Scan data could not be built or read
    #[error("Scan data error: {0}")]
    Scan(#[from] ScanDataError),

    /// Region topology could not be built
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigLoadError),
}

/// Malformed or inconsistent scan input
#[derive(Debug, thiserror::Error)]
pub enum ScanDataError {
    /// A record line could not be parsed
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number in the record text
        line: usize,
        /// What was wrong
        message: String,
    },

    /// An interval is not parallel to the first one
    #[error("line {line}: interval angle differs from the first interval")]
    InconsistentAngle {
        /// 1-based line number in the record text
        line: usize,
    },

    /// Spacing between scan lines is not uniform
    #[error("line {line}: scan line spacing differs from the spacing derived earlier")]
    InconsistentSpacing {
        /// 1-based line number in the record text
        line: usize,
    },

    /// Only one scan line is present but more are implied by the ids
    #[error("scan line spacing cannot be derived from a single populated line")]
    UndeterminedSpacing,

    /// Spacing is not a positive finite number
    #[error("invalid scan line spacing: {0}")]
    InvalidSpacing(f64),

    /// No interval found
    #[error("scan record contains no intervals")]
    Empty,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid outline input for region topology
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// A path segment stream violates move/line/close ordering
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// Combining the outlines left no area at all
    #[error("outlines combine to an empty region")]
    EmptyRegion,
}
