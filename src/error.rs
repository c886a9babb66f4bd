use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A grid size or site coordinate outside its allowed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A malformed replay file.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
