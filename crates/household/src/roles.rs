use std::collections::{BTreeMap, BTreeSet};

use models::{Action, Feature, PermissionGrant, Role, SpendingLimits};
use serde::{Deserialize, Serialize};

/// Default grants and limits for one role.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoleDefinition {
    pub permissions: Vec<PermissionGrant>,
    #[serde(default)]
    pub limits: Option<SpendingLimits>,
}

/// Process-wide role → permission lookup.
///
/// Built once at startup and shared by reference; requests only read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RolePermissionTable {
    pub version: u32,
    roles: BTreeMap<Role, RoleDefinition>,
}

const ALL_ACTIONS: &[Action] = &[Action::View, Action::Create, Action::Edit, Action::Delete, Action::Approve];
const MANAGE: &[Action] = &[Action::View, Action::Create, Action::Edit, Action::Delete];
const CONTRIBUTE: &[Action] = &[Action::View, Action::Create, Action::Edit];
const VIEW: &[Action] = &[Action::View];

impl RolePermissionTable {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            roles: BTreeMap::new(),
        }
    }

    /// Adds or replaces a role definition while the table is being built.
    pub fn with_role(mut self, role: Role, definition: RoleDefinition) -> Self {
        self.roles.insert(role, definition);
        self
    }

    /// The built-in household roles.
    pub fn standard() -> Self {
        let owner = RoleDefinition {
            permissions: grants(&[(Feature::All, ALL_ACTIONS)]),
            limits: None,
        };

        let admin = RoleDefinition {
            permissions: grants(&[
                (Feature::Accounts, ALL_ACTIONS),
                (Feature::Transactions, ALL_ACTIONS),
                (Feature::Budgets, ALL_ACTIONS),
                (Feature::Bills, ALL_ACTIONS),
                (Feature::Subscriptions, ALL_ACTIONS),
                (Feature::Goals, ALL_ACTIONS),
                (Feature::Debts, ALL_ACTIONS),
                (Feature::Tasks, ALL_ACTIONS),
                (Feature::Insights, VIEW),
                (Feature::Reports, VIEW),
                (Feature::Payroll, VIEW),
                (Feature::Members, CONTRIBUTE),
                (Feature::Settings, &[Action::View, Action::Edit]),
                (Feature::Notifications, &[Action::View, Action::Edit]),
            ]),
            limits: None,
        };

        let member = RoleDefinition {
            permissions: grants(&[
                (Feature::Accounts, VIEW),
                (Feature::Transactions, CONTRIBUTE),
                (Feature::Budgets, VIEW),
                (Feature::Bills, &[Action::View, Action::Create]),
                (Feature::Subscriptions, VIEW),
                (Feature::Goals, CONTRIBUTE),
                (Feature::Debts, VIEW),
                (Feature::Tasks, MANAGE),
                (Feature::Insights, VIEW),
                (Feature::Notifications, &[Action::View, Action::Edit]),
            ]),
            limits: Some(SpendingLimits {
                max_transaction_amount: Some(2000.0),
                require_approval_above: Some(500.0),
                daily_spending_limit: None,
            }),
        };

        let viewer = RoleDefinition {
            permissions: grants(&[
                (Feature::Accounts, VIEW),
                (Feature::Transactions, VIEW),
                (Feature::Budgets, VIEW),
                (Feature::Bills, VIEW),
                (Feature::Subscriptions, VIEW),
                (Feature::Goals, VIEW),
                (Feature::Debts, VIEW),
                (Feature::Reports, VIEW),
            ]),
            limits: None,
        };

        let child = RoleDefinition {
            permissions: grants(&[
                (Feature::Transactions, &[Action::View, Action::Create]),
                (Feature::Goals, &[Action::View, Action::Create]),
                (Feature::Tasks, &[Action::View, Action::Edit]),
                (Feature::Notifications, VIEW),
            ]),
            limits: Some(SpendingLimits {
                max_transaction_amount: Some(50.0),
                require_approval_above: Some(20.0),
                daily_spending_limit: Some(25.0),
            }),
        };

        Self::new(1)
            .with_role(Role::Owner, owner)
            .with_role(Role::Admin, admin)
            .with_role(Role::Member, member)
            .with_role(Role::Viewer, viewer)
            .with_role(Role::Child, child)
    }

    pub fn role(&self, role: Role) -> Option<&RoleDefinition> {
        self.roles.get(&role)
    }

    pub fn role_limits(&self, role: Role) -> Option<&SpendingLimits> {
        self.role(role).and_then(|def| def.limits.as_ref())
    }

    /// Every feature the role can act on at all, sorted. The wildcard
    /// expands to the full list of known features.
    pub fn visible_features(&self, role: Role) -> Vec<Feature> {
        let mut features = BTreeSet::new();
        let Some(definition) = self.role(role) else {
            return Vec::new();
        };
        for grant in &definition.permissions {
            if !grant.actions.iter().any(|a| *a != Action::Unknown) {
                continue;
            }
            match grant.feature {
                Feature::All => features.extend(Feature::KNOWN),
                Feature::Unknown => {}
                feature => {
                    features.insert(feature);
                }
            }
        }
        features.into_iter().collect()
    }
}

fn grants(list: &[(Feature, &[Action])]) -> Vec<PermissionGrant> {
    list.iter()
        .map(|(feature, actions)| PermissionGrant::new(*feature, actions))
        .collect()
}

impl Default for RolePermissionTable {
    fn default() -> Self {
        Self::standard()
    }
}
