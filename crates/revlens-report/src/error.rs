use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Db(#[from] revlens_db::DbError),

    #[error("failed to write report file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Nothing persisted yet for the requested subject; there is no report
    /// to generate.
    #[error("no persisted analyses found for {subject}")]
    NoData { subject: String },

    /// The synthesis call produced neither a summary nor a structured
    /// block, usually after exhausted retries.
    #[error("synthesis produced no output for {subject}")]
    SynthesisFailed { subject: String },
}
