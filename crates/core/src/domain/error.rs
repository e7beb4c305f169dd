use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),
}
