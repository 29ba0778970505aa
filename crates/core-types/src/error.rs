use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Column '{0}' has {1} entries but the date axis has {2}")]
    LengthMismatch(String, usize, usize),
}
