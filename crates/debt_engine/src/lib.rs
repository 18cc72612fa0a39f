//! Debt payoff and credit strategy engine.
//!
//! Pure calculations over already-fetched debts: avalanche and snowball
//! payoff schedules, their comparison, the projected debt-free date, a
//! heuristic credit score and revolving credit utilization.

pub mod credit;
pub mod error;
pub mod payoff;
pub mod summary;

pub use credit::{calculate_credit_utilization, estimate_credit_score, utilization_from_debts};
pub use error::{DebtError, Result};
pub use payoff::{compare_strategies, freedom_date, parse_strategy, simulate_payoff, PayoffEngine, DEFAULT_MAX_MONTHS};
pub use summary::summarize_debts;
