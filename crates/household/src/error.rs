use thiserror::Error;

pub type Result<T> = std::result::Result<T, HouseholdError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HouseholdError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
