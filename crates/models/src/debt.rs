use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
	CreditCard,
	StudentLoan,
	AutoLoan,
	Mortgage,
	PersonalLoan,
	Medical,
	#[serde(other)]
	Other,
}

impl DebtType {
	/// Only revolving debts carry a meaningful credit limit.
	pub fn is_revolving(&self) -> bool {
		matches!(self, DebtType::CreditCard)
	}
}

// Raw input debt, as supplied by the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub lender: String,
	#[serde(rename = "type", default = "default_debt_type")]
	pub kind: DebtType,
	pub balance: f64,
	#[serde(default, alias = "creditLimit")]
	pub credit_limit: Option<f64>,
	#[serde(alias = "interestRate")]
	pub interest_rate: f64, // annual nominal %, 19.99 means 19.99%/year
	#[serde(alias = "minimumPayment")]
	pub minimum_payment: f64,
	#[serde(default, alias = "dueDate")]
	pub due_date: Option<u8>, // day of month, informational only
}

fn default_debt_type() -> DebtType {
	DebtType::Other
}

impl Debt {
	/// Balances under half a cent round to zero and count as paid off.
	pub fn is_paid_off(&self) -> bool {
		crate::round2(self.balance) <= 0.0
	}
}

/// Extra-payment ordering used by the payoff simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
	/// Highest interest rate first
	Avalanche,
	/// Lowest balance first
	Snowball,
}

impl Strategy {
	pub fn as_str(&self) -> &'static str {
		match self {
			Strategy::Avalanche => "avalanche",
			Strategy::Snowball => "snowball",
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Strategy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"avalanche" => Ok(Strategy::Avalanche),
			"snowball" => Ok(Strategy::Snowball),
			other => Err(other.to_string()),
		}
	}
}

// Output models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoffScheduleEntry {
	pub month: u32,
	pub debt_id: String,
	pub payment: f64,
	pub interest: f64,
	pub principal: f64,
	pub remaining_balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoffStrategy {
	pub strategy: Strategy,
	pub schedule: Vec<PayoffScheduleEntry>,
	pub total_interest: f64,
	pub total_paid: f64,
	pub total_months: u32,
	pub payoff_order: Vec<String>,
}

impl PayoffStrategy {
	/// Entries recorded for a single debt, in month order.
	pub fn entries_for<'a>(&'a self, debt_id: &'a str) -> impl Iterator<Item = &'a PayoffScheduleEntry> + 'a {
		self.schedule.iter().filter(move |e| e.debt_id == debt_id)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyComparison {
	pub avalanche: PayoffStrategy,
	pub snowball: PayoffStrategy,
	/// Snowball interest minus avalanche interest; negative when snowball was cheaper
	pub interest_saved: f64,
	/// Snowball months minus avalanche months
	pub months_saved: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreedomDate {
	pub freedom_date: NaiveDate,
	pub months: u32,
	pub plan: PayoffStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtSummary {
	pub total_balance: f64,
	pub total_minimum_payment: f64,
	pub weighted_average_rate: f64,
	pub active_debts: usize,
	pub highest_rate_debt_id: Option<String>,
	pub credit_utilization: f64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_debt_deserialize_accepts_camel_case_aliases() {
		let raw = r#"{
			"id": "visa",
			"name": "Visa",
			"lender": "Bank",
			"type": "credit_card",
			"balance": 1200.5,
			"creditLimit": 5000,
			"interestRate": 19.99,
			"minimumPayment": 35,
			"dueDate": 14
		}"#;
		let debt: Debt = serde_json::from_str(raw).unwrap();
		assert_eq!(debt.kind, DebtType::CreditCard);
		assert_eq!(debt.credit_limit, Some(5000.0));
		assert_eq!(debt.interest_rate, 19.99);
		assert_eq!(debt.minimum_payment, 35.0);
		assert_eq!(debt.due_date, Some(14));
	}

	#[test]
	fn test_debt_unknown_type_falls_back_to_other() {
		let raw = r#"{"id":"x","type":"payday","balance":10,"interest_rate":0,"minimum_payment":1}"#;
		let debt: Debt = serde_json::from_str(raw).unwrap();
		assert_eq!(debt.kind, DebtType::Other);
		assert!(!debt.kind.is_revolving());
	}

	#[test]
	fn test_sub_cent_balance_is_paid_off() {
		let raw = r#"{"id":"x","balance":0.004,"interest_rate":0,"minimum_payment":1}"#;
		let mut debt: Debt = serde_json::from_str(raw).unwrap();
		assert!(debt.is_paid_off());
		debt.balance = 0.005;
		assert!(!debt.is_paid_off());
	}

	#[test]
	fn test_strategy_from_str() {
		assert_eq!("avalanche".parse::<Strategy>(), Ok(Strategy::Avalanche));
		assert_eq!(" Snowball ".parse::<Strategy>(), Ok(Strategy::Snowball));
		assert_eq!("fastest".parse::<Strategy>(), Err("fastest".to_string()));
	}
}
