use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("No base rate configured for {month}/{year}")]
    MissingRateEntry { month: u32, year: i32 },

    #[error("No tax threshold configured for {0}")]
    MissingThresholdEntry(i32),

    #[error("Invalid month: {0} (expected 1..=12)")]
    InvalidMonth(u32),

    #[error("Charge for {month}/{year} is out of range")]
    ChargeOverflow { month: u32, year: i32 },

    #[error("Validation: {0}")]
    Validation(String),
}

impl DomainError {
    /// Whether the error comes from an incomplete rate table rather than
    /// from a malformed reading.
    pub fn is_missing_entry(&self) -> bool {
        matches!(
            self,
            DomainError::MissingRateEntry { .. } | DomainError::MissingThresholdEntry(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Infra(e.into())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Infra(e.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Infra(e.into())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for anything touching files or parsers
pub type AppResult<T> = Result<T, AppError>;
