use models::{
    round2, Action, DailyLimitCheck, Feature, Household, HouseholdMember, SpendingLimits, TransactionReview,
};

use crate::roles::RolePermissionTable;

impl RolePermissionTable {
    /// Decides whether `member` may perform `action` on `feature`.
    ///
    /// Inactive members, unknown features and unknown actions are always
    /// denied. A custom grant for the feature (or a custom wildcard) replaces
    /// the role defaults entirely.
    pub fn has_permission(&self, member: &HouseholdMember, feature: Feature, action: Action) -> bool {
        if !member.is_active {
            return false;
        }
        if !feature.is_concrete() || action == Action::Unknown {
            return false;
        }

        if let Some(custom) = &member.custom_permissions {
            let grant = custom
                .iter()
                .find(|g| g.feature == feature)
                .or_else(|| custom.iter().find(|g| g.feature == Feature::All));
            if let Some(grant) = grant {
                return grant.allows(action);
            }
        }

        self.role(member.role)
            .map(|definition| {
                definition
                    .permissions
                    .iter()
                    .any(|g| (g.feature == feature || g.feature == Feature::All) && g.allows(action))
            })
            .unwrap_or(false)
    }

    /// True when any of the member limit, the role default or the
    /// household's large-transaction rule asks for approval.
    pub fn requires_approval(&self, member: &HouseholdMember, amount: f64, household: &Household) -> bool {
        let member_threshold = member.limits.and_then(|l| l.require_approval_above);
        if member_threshold.is_some_and(|t| amount > t) {
            return true;
        }

        let role_threshold = self.role_limits(member.role).and_then(|l| l.require_approval_above);
        if role_threshold.is_some_and(|t| amount > t) {
            return true;
        }

        household.require_approval_for_large_transactions && amount > household.large_transaction_threshold
    }

    pub fn check_daily_limit(&self, member: &HouseholdMember, today_spending: f64, proposed_amount: f64) -> DailyLimitCheck {
        match self.effective_limit(member, |l| l.daily_spending_limit) {
            None => DailyLimitCheck {
                allowed: true,
                remaining: None,
            },
            Some(limit) => {
                let remaining = round2((limit - today_spending).max(0.0));
                DailyLimitCheck {
                    allowed: proposed_amount <= remaining,
                    remaining: Some(remaining),
                }
            }
        }
    }

    pub fn exceeds_max_transaction(&self, member: &HouseholdMember, amount: f64) -> bool {
        self.effective_limit(member, |l| l.max_transaction_amount)
            .is_some_and(|max| amount > max)
    }

    /// Everything a request handler needs to decide on a proposed spend.
    pub fn review_transaction(
        &self,
        member: &HouseholdMember,
        household: &Household,
        amount: f64,
        today_spending: f64,
    ) -> TransactionReview {
        let review = TransactionReview {
            can_create: self.has_permission(member, Feature::Transactions, Action::Create),
            requires_approval: self.requires_approval(member, amount, household),
            within_max_transaction: !self.exceeds_max_transaction(member, amount),
            daily_limit: self.check_daily_limit(member, today_spending, amount),
        };
        tracing::debug!(
            member_id = %member.id,
            role = %member.role,
            amount,
            can_create = review.can_create,
            requires_approval = review.requires_approval,
            "transaction reviewed"
        );
        review
    }

    /// Member override first, then the role default.
    fn effective_limit(&self, member: &HouseholdMember, pick: impl Fn(&SpendingLimits) -> Option<f64>) -> Option<f64> {
        member
            .limits
            .as_ref()
            .and_then(&pick)
            .or_else(|| self.role_limits(member.role).and_then(&pick))
    }
}
