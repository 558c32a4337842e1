use std::path::PathBuf;

/// Pipeline error taxonomy.
///
/// Every failure here is a deterministic function of the input (no network,
/// no concurrency), so each variant carries enough context to diagnose the
/// problem without re-running: the offending path, 1-based CSV line, field
/// name, or grouping dimension.
///
/// Exit code scheme:
/// - 2: input could not be read, or does not match the column contract
/// - 3: nothing to analyze (empty dataset / empty aggregate)
/// - 4: grouping or rendering failed on otherwise-loadable data
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// The input CSV could not be located or opened.
    SourceNotFound { path: PathBuf, message: String },
    /// The header row violates the fixed column contract.
    Schema { message: String },
    /// A data row failed validation. In strict mode this aborts the load.
    MalformedRecord {
        line: usize,
        field: &'static str,
        message: String,
    },
    /// An output file could not be created or written.
    Io { path: PathBuf, message: String },
    /// Zero valid records were available for analysis.
    EmptyDataset { source: String },
    /// An aggregate with zero groups has no extremum to select.
    EmptyAggregate { dimension: String },
    /// A grouping key could not be derived for a record.
    InvalidGrouping {
        line: usize,
        product: String,
        message: String,
    },
    /// A chart could not be rendered.
    Render { target: String, message: String },
}

impl AnalysisError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AnalysisError::SourceNotFound { .. }
            | AnalysisError::Schema { .. }
            | AnalysisError::MalformedRecord { .. }
            | AnalysisError::Io { .. } => 2,
            AnalysisError::EmptyDataset { .. } | AnalysisError::EmptyAggregate { .. } => 3,
            AnalysisError::InvalidGrouping { .. } | AnalysisError::Render { .. } => 4,
        }
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::SourceNotFound { path, message } => {
                write!(f, "Failed to open sales CSV '{}': {message}", path.display())
            }
            AnalysisError::Schema { message } => write!(f, "{message}"),
            AnalysisError::MalformedRecord {
                line,
                field,
                message,
            } => {
                write!(f, "Malformed record at line {line}, field `{field}`: {message}")
            }
            AnalysisError::Io { path, message } => {
                write!(f, "Failed to write '{}': {message}", path.display())
            }
            AnalysisError::EmptyDataset { source } => {
                write!(f, "No valid sales records in {source}.")
            }
            AnalysisError::EmptyAggregate { dimension } => {
                write!(f, "Cannot select insights from an empty by-{dimension} aggregate.")
            }
            AnalysisError::InvalidGrouping {
                line,
                product,
                message,
            } => {
                write!(
                    f,
                    "Cannot derive grouping key for record at line {line} ('{product}'): {message}"
                )
            }
            AnalysisError::Render { target, message } => {
                write!(f, "Failed to render {target}: {message}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
