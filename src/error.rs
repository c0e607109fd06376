use std::path::PathBuf;

/// Failures that stop a report run.
///
/// Payload problems that can be tolerated (out-of-range stars, metric strings
/// that do not parse) are not errors; the loader counts them in its
/// `LoadReport` instead.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to read input file {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse review analytics from {origin}: {source}")]
    ParseInput {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write CSV report {}: {source}", .path.display())]
    WriteCsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to serialize JSON summary: {0}")]
    SerializeJson(#[source] serde_json::Error),
    #[error("failed to write JSON summary {}: {source}", .path.display())]
    WriteJson {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no data loaded; load the input file first")]
    NoData,
}

pub type ReportResult<T> = Result<T, ReportError>;
