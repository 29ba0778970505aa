use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Change series length mismatch: equity has {0} periods, rate has {1}")]
    LengthMismatch(usize, usize),
}
