use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid SQL identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid seller type: {0}")]
    InvalidSellerType(String),

    #[error("Invalid validity window: start {start} is after end {end}")]
    InvalidValidityWindow { start: NaiveDate, end: NaiveDate },
}
