use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelCheckError {
    #[error(transparent)]
    Parse(#[from] crate::terraform::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
