use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CreditFactors {
	#[serde(alias = "creditUtilization")]
	pub credit_utilization: f64, // 0..1
	#[serde(alias = "paymentHistory")]
	pub payment_history: f64, // 0..1, share of on-time payments
	#[serde(alias = "accountAge")]
	pub account_age: u32, // months
	#[serde(alias = "accountCount")]
	pub account_count: u32,
	#[serde(alias = "hardInquiries")]
	pub hard_inquiries: u32,
	#[serde(alias = "derogatoriesCount")]
	pub derogatories_count: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CreditRating {
	Poor,
	Fair,
	Good,
	VeryGood,
	Excellent,
}

impl CreditRating {
	pub fn from_score(score: u16) -> Self {
		match score {
			0..=579 => CreditRating::Poor,
			580..=669 => CreditRating::Fair,
			670..=739 => CreditRating::Good,
			740..=799 => CreditRating::VeryGood,
			_ => CreditRating::Excellent,
		}
	}
}

/// Points contributed by each factor before clamping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
	pub base: f64,
	pub payment_history: f64,
	pub utilization: f64,
	pub account_age: f64,
	pub account_count: f64,
	pub hard_inquiries: f64,
	pub derogatories: f64,
}

impl ScoreBreakdown {
	pub fn total(&self) -> f64 {
		self.base + self.payment_history + self.utilization + self.account_age + self.account_count
			- self.hard_inquiries
			- self.derogatories
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CreditScoreEstimate {
	pub score: u16,
	pub rating: CreditRating,
	pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RevolvingAccount {
	pub balance: f64,
	#[serde(default, alias = "creditLimit")]
	pub credit_limit: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditUtilization {
	pub utilization: f64,
	/// `None` for accounts without a credit limit
	pub per_account: Vec<Option<f64>>,
	pub total_balance: f64,
	pub total_limit: f64,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rating_bands() {
		assert_eq!(CreditRating::from_score(300), CreditRating::Poor);
		assert_eq!(CreditRating::from_score(579), CreditRating::Poor);
		assert_eq!(CreditRating::from_score(580), CreditRating::Fair);
		assert_eq!(CreditRating::from_score(700), CreditRating::Good);
		assert_eq!(CreditRating::from_score(740), CreditRating::VeryGood);
		assert_eq!(CreditRating::from_score(850), CreditRating::Excellent);
	}

	#[test]
	fn test_credit_factors_accept_camel_case() {
		let raw = r#"{"creditUtilization":0.25,"paymentHistory":0.97,"accountAge":48,"accountCount":4,"hardInquiries":1,"derogatoriesCount":0}"#;
		let f: CreditFactors = serde_json::from_str(raw).unwrap();
		assert_eq!(f.account_age, 48);
		assert_eq!(f.hard_inquiries, 1);
	}
}
