use thiserror::Error;

/// Fatal conditions: these abort a run before or instead of producing a
/// report. Per-tournament anomalies never end up here; they ride along in
/// the report as `TournamentExclusion` values.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no events to process")]
    EmptyInput,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// A time field that matched none of the accepted formats. The offending
/// row is dropped and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable timestamp {raw:?}")]
pub struct UnparsableTimestamp {
    pub raw: String,
}
