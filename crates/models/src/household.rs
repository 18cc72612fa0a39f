use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	Owner,
	Admin,
	Member,
	Viewer,
	Child,
}

impl Role {
	pub const ALL: [Role; 5] = [Role::Owner, Role::Admin, Role::Member, Role::Viewer, Role::Child];

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Owner => "owner",
			Role::Admin => "admin",
			Role::Member => "member",
			Role::Viewer => "viewer",
			Role::Child => "child",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Role::ALL
			.into_iter()
			.find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| s.to_string())
	}
}

/// Application features a permission can be granted on.
///
/// `All` is the wildcard used by grants (`"*"`). Every unrecognized name
/// deserializes to `Unknown`, which never matches any grant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
	Accounts,
	Transactions,
	Budgets,
	Bills,
	Subscriptions,
	Goals,
	Debts,
	Tasks,
	Insights,
	Reports,
	Payroll,
	Members,
	Settings,
	Notifications,
	#[serde(rename = "*")]
	All,
	#[serde(other)]
	Unknown,
}

impl Feature {
	pub const KNOWN: [Feature; 14] = [
		Feature::Accounts,
		Feature::Transactions,
		Feature::Budgets,
		Feature::Bills,
		Feature::Subscriptions,
		Feature::Goals,
		Feature::Debts,
		Feature::Tasks,
		Feature::Insights,
		Feature::Reports,
		Feature::Payroll,
		Feature::Members,
		Feature::Settings,
		Feature::Notifications,
	];

	/// A concrete feature, i.e. neither the wildcard nor `Unknown`.
	pub fn is_concrete(&self) -> bool {
		!matches!(self, Feature::All | Feature::Unknown)
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	View,
	Create,
	Edit,
	Delete,
	Approve,
	#[serde(other)]
	Unknown,
}

impl Action {
	pub const KNOWN: [Action; 5] = [Action::View, Action::Create, Action::Edit, Action::Delete, Action::Approve];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PermissionGrant {
	pub feature: Feature,
	#[serde(alias = "allowedActions")]
	pub actions: Vec<Action>,
}

impl PermissionGrant {
	pub fn new(feature: Feature, actions: &[Action]) -> Self {
		Self { feature, actions: actions.to_vec() }
	}

	pub fn allows(&self, action: Action) -> bool {
		action != Action::Unknown && self.actions.contains(&action)
	}
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SpendingLimits {
	#[serde(default, alias = "maxTransactionAmount")]
	pub max_transaction_amount: Option<f64>,
	#[serde(default, alias = "requireApprovalAbove")]
	pub require_approval_above: Option<f64>,
	#[serde(default, alias = "dailySpendingLimit")]
	pub daily_spending_limit: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HouseholdMember {
	pub id: String,
	#[serde(alias = "householdId")]
	pub household_id: String,
	#[serde(alias = "userId")]
	pub user_id: String,
	pub role: Role,
	#[serde(default, alias = "customPermissions")]
	pub custom_permissions: Option<Vec<PermissionGrant>>,
	#[serde(default)]
	pub limits: Option<SpendingLimits>,
	#[serde(default = "default_true", alias = "isActive")]
	pub is_active: bool,
}

fn default_true() -> bool {
	true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Household {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default, alias = "requireApprovalForLargeTransactions")]
	pub require_approval_for_large_transactions: bool,
	#[serde(default, alias = "largeTransactionThreshold")]
	pub large_transaction_threshold: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyLimitCheck {
	pub allowed: bool,
	/// `None` means no limit applies
	pub remaining: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TransactionReview {
	pub can_create: bool,
	pub requires_approval: bool,
	pub within_max_transaction: bool,
	pub daily_limit: DailyLimitCheck,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InviteValidation {
	pub valid: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub household_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<Role>,
	#[serde(default)]
	pub expired: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_feature_wildcard_and_unknown() {
		let f: Feature = serde_json::from_str("\"*\"").unwrap();
		assert_eq!(f, Feature::All);
		let f: Feature = serde_json::from_str("\"crypto_wallets\"").unwrap();
		assert_eq!(f, Feature::Unknown);
		let f: Feature = serde_json::from_str("\"bills\"").unwrap();
		assert_eq!(f, Feature::Bills);
		assert!(f.is_concrete());
		assert!(!Feature::All.is_concrete());
	}

	#[test]
	fn test_unknown_action_never_allowed() {
		let a: Action = serde_json::from_str("\"launch\"").unwrap();
		assert_eq!(a, Action::Unknown);
		let grant = PermissionGrant::new(Feature::Bills, &[Action::View, Action::Unknown]);
		assert!(!grant.allows(Action::Unknown));
		assert!(grant.allows(Action::View));
	}

	#[test]
	fn test_member_defaults_to_active() {
		let raw = r#"{"id":"m1","householdId":"h1","userId":"u1","role":"child"}"#;
		let m: HouseholdMember = serde_json::from_str(raw).unwrap();
		assert!(m.is_active);
		assert_eq!(m.role, Role::Child);
		assert!(m.custom_permissions.is_none());
	}

	#[test]
	fn test_role_from_str() {
		assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
		assert!("superuser".parse::<Role>().is_err());
	}
}
