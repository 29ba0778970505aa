use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown company: '{0}'")]
    UnknownCompany(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No equity data available for company '{0}'")]
    EquityUnavailable(String),

    #[error("Data access error: {0}")]
    Provider(#[from] data_access::ProviderError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Core data error: {0}")]
    Core(#[from] core_types::CoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}
