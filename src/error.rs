use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("line {line}: missing ';' separator")]
    MissingSeparator { line: usize },

    #[error("line {line}: invalid measurement {text:?}")]
    InvalidMeasurement { line: usize, text: String },
}
