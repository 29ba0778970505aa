use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to read source data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse source data: {0}")]
    Parse(#[from] csv::Error),

    #[error("Invalid data format from source: {0}")]
    InvalidData(String),
}
