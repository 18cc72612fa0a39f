use thiserror::Error;

pub type Result<T> = std::result::Result<T, DebtError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DebtError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Monthly budget {budget:.2} is below the sum of minimum payments {required:.2}")]
    InsufficientBudget { budget: f64, required: f64 },

    #[error("Payoff did not converge within {months} months")]
    PayoffNotConverging { months: u32 },

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}
