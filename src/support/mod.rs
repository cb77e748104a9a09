pub mod errors;

pub use errors::{AppError, AppResult, DomainError, DomainResult, InfraError};
