use models::{
    round2, round4, CreditFactors, CreditRating, CreditScoreEstimate, CreditUtilization, Debt, RevolvingAccount,
    ScoreBreakdown,
};

use crate::error::{DebtError, Result};

// Weight table for the score heuristic. Illustrative only, not a bureau
// algorithm (FICO/VantageScore).
pub const SCORE_BASE: f64 = 300.0;
pub const SCORE_MIN: f64 = 300.0;
pub const SCORE_MAX: f64 = 850.0;
pub const PAYMENT_HISTORY_POINTS: f64 = 350.0;
pub const UTILIZATION_POINTS: f64 = 150.0;
pub const ACCOUNT_AGE_POINTS: f64 = 60.0;
pub const ACCOUNT_AGE_SATURATION_MONTHS: u32 = 120;
pub const ACCOUNT_COUNT_POINTS_EACH: f64 = 8.0;
pub const ACCOUNT_COUNT_SATURATION: u32 = 5;
pub const HARD_INQUIRY_PENALTY: f64 = 10.0;
pub const HARD_INQUIRY_PENALTY_CAP: f64 = 50.0;
pub const DEROGATORY_PENALTY: f64 = 40.0;
pub const DEROGATORY_PENALTY_CAP: f64 = 150.0;

/// Estimates a credit score in the 300-850 range from a fixed set of factors.
pub fn estimate_credit_score(factors: &CreditFactors) -> Result<CreditScoreEstimate> {
    for (field, value) in [
        ("credit_utilization", factors.credit_utilization),
        ("payment_history", factors.payment_history),
    ] {
        if !value.is_finite() {
            return Err(DebtError::InvalidInput(format!("{} must be a finite number", field)));
        }
    }

    let payment_history = factors.payment_history.clamp(0.0, 1.0);
    let utilization = factors.credit_utilization.clamp(0.0, 1.0);
    let age_months = factors.account_age.min(ACCOUNT_AGE_SATURATION_MONTHS);
    let accounts = factors.account_count.min(ACCOUNT_COUNT_SATURATION);

    let breakdown = ScoreBreakdown {
        base: SCORE_BASE,
        payment_history: PAYMENT_HISTORY_POINTS * payment_history,
        utilization: UTILIZATION_POINTS * (1.0 - utilization),
        account_age: ACCOUNT_AGE_POINTS * f64::from(age_months) / f64::from(ACCOUNT_AGE_SATURATION_MONTHS),
        account_count: ACCOUNT_COUNT_POINTS_EACH * f64::from(accounts),
        hard_inquiries: (HARD_INQUIRY_PENALTY * f64::from(factors.hard_inquiries)).min(HARD_INQUIRY_PENALTY_CAP),
        derogatories: (DEROGATORY_PENALTY * f64::from(factors.derogatories_count)).min(DEROGATORY_PENALTY_CAP),
    };

    let score = breakdown.total().round().clamp(SCORE_MIN, SCORE_MAX) as u16;
    Ok(CreditScoreEstimate {
        score,
        rating: CreditRating::from_score(score),
        breakdown,
    })
}

/// Aggregate utilization is `sum(balance) / sum(limit)` over accounts that
/// carry a positive limit; accounts without one are left out of both sums.
pub fn calculate_credit_utilization(accounts: &[RevolvingAccount]) -> Result<CreditUtilization> {
    let mut per_account = Vec::with_capacity(accounts.len());
    let mut total_balance = 0.0;
    let mut total_limit = 0.0;

    for (i, account) in accounts.iter().enumerate() {
        if !account.balance.is_finite() || account.balance < 0.0 {
            return Err(DebtError::InvalidInput(format!(
                "account {}: balance must be a non-negative number, got {}",
                i, account.balance
            )));
        }
        match account.credit_limit {
            Some(limit) if !limit.is_finite() || limit < 0.0 => {
                return Err(DebtError::InvalidInput(format!(
                    "account {}: credit_limit must be a non-negative number, got {}",
                    i, limit
                )));
            }
            Some(limit) if limit > 0.0 => {
                per_account.push(Some(round4(account.balance / limit)));
                total_balance += account.balance;
                total_limit += limit;
            }
            _ => per_account.push(None),
        }
    }

    let utilization = if total_limit > 0.0 {
        round4(total_balance / total_limit)
    } else {
        0.0
    };

    Ok(CreditUtilization {
        utilization,
        per_account,
        total_balance: round2(total_balance),
        total_limit: round2(total_limit),
    })
}

/// Utilization over the revolving debts in a debt list.
pub fn utilization_from_debts(debts: &[Debt]) -> Result<CreditUtilization> {
    let accounts: Vec<RevolvingAccount> = debts
        .iter()
        .filter(|d| d.kind.is_revolving())
        .map(|d| RevolvingAccount {
            balance: d.balance,
            credit_limit: d.credit_limit,
        })
        .collect();
    calculate_credit_utilization(&accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::DebtType;

    fn factors() -> CreditFactors {
        CreditFactors {
            credit_utilization: 0.25,
            payment_history: 0.97,
            account_age: 48,
            account_count: 4,
            hard_inquiries: 1,
            derogatories_count: 0,
        }
    }

    #[test]
    fn test_score_for_reference_profile() {
        let estimate = estimate_credit_score(&factors()).unwrap();
        // 300 + 339.5 + 112.5 + 24 + 32 - 10
        assert_eq!(estimate.score, 798);
        assert_eq!(estimate.rating, CreditRating::VeryGood);
        assert!((300..=850).contains(&estimate.score));
    }

    #[test]
    fn test_score_is_deterministic() {
        let a = estimate_credit_score(&factors()).unwrap();
        let b = estimate_credit_score(&factors()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_monotonic_in_payment_history() {
        let mut previous = 0;
        for step in 0..=20 {
            let mut f = factors();
            f.payment_history = step as f64 / 20.0;
            let score = estimate_credit_score(&f).unwrap().score;
            assert!(score >= previous, "score dropped at payment_history {}", f.payment_history);
            previous = score;
        }
    }

    #[test]
    fn test_score_clamped_to_range() {
        let best = CreditFactors {
            credit_utilization: 0.0,
            payment_history: 1.0,
            account_age: 400,
            account_count: 30,
            hard_inquiries: 0,
            derogatories_count: 0,
        };
        assert_eq!(estimate_credit_score(&best).unwrap().score, 850);

        let worst = CreditFactors {
            credit_utilization: 3.0,
            payment_history: 0.0,
            account_age: 0,
            account_count: 0,
            hard_inquiries: 40,
            derogatories_count: 12,
        };
        let estimate = estimate_credit_score(&worst).unwrap();
        assert_eq!(estimate.score, 300);
        assert_eq!(estimate.breakdown.hard_inquiries, HARD_INQUIRY_PENALTY_CAP);
        assert_eq!(estimate.breakdown.derogatories, DEROGATORY_PENALTY_CAP);
    }

    #[test]
    fn test_score_rejects_nan() {
        let mut f = factors();
        f.payment_history = f64::NAN;
        assert!(matches!(estimate_credit_score(&f), Err(DebtError::InvalidInput(_))));
    }

    #[test]
    fn test_utilization_aggregate_and_per_account() {
        let accounts = [
            RevolvingAccount { balance: 500.0, credit_limit: Some(1000.0) },
            RevolvingAccount { balance: 1500.0, credit_limit: Some(3000.0) },
        ];
        let result = calculate_credit_utilization(&accounts).unwrap();
        assert_eq!(result.utilization, 0.5);
        assert_eq!(result.per_account, vec![Some(0.5), Some(0.5)]);
    }

    #[test]
    fn test_utilization_totals_rounded_to_cents() {
        let accounts = [
            RevolvingAccount { balance: 0.1, credit_limit: Some(100.1) },
            RevolvingAccount { balance: 0.2, credit_limit: Some(200.2) },
        ];
        let result = calculate_credit_utilization(&accounts).unwrap();
        assert_eq!(result.total_balance, 0.3);
        assert_eq!(result.total_limit, 300.3);
    }

    #[test]
    fn test_utilization_without_limits_is_zero() {
        assert_eq!(calculate_credit_utilization(&[]).unwrap().utilization, 0.0);

        let accounts = [
            RevolvingAccount { balance: 700.0, credit_limit: None },
            RevolvingAccount { balance: 100.0, credit_limit: Some(0.0) },
        ];
        let result = calculate_credit_utilization(&accounts).unwrap();
        assert_eq!(result.utilization, 0.0);
        assert_eq!(result.per_account, vec![None, None]);
    }

    #[test]
    fn test_utilization_skips_accounts_without_limit() {
        let accounts = [
            RevolvingAccount { balance: 250.0, credit_limit: Some(1000.0) },
            RevolvingAccount { balance: 9999.0, credit_limit: None },
        ];
        let result = calculate_credit_utilization(&accounts).unwrap();
        assert_eq!(result.utilization, 0.25);
        assert_eq!(result.total_balance, 250.0);
    }

    #[test]
    fn test_utilization_rejects_negative_balance() {
        let accounts = [RevolvingAccount { balance: -1.0, credit_limit: Some(100.0) }];
        assert!(calculate_credit_utilization(&accounts).is_err());
    }

    #[test]
    fn test_utilization_from_debts_uses_credit_cards_only() {
        let card = Debt {
            id: "visa".to_string(),
            name: "Visa".to_string(),
            lender: "Bank".to_string(),
            kind: DebtType::CreditCard,
            balance: 300.0,
            credit_limit: Some(1000.0),
            interest_rate: 19.99,
            minimum_payment: 25.0,
            due_date: None,
        };
        let loan = Debt {
            id: "auto".to_string(),
            kind: DebtType::AutoLoan,
            credit_limit: Some(20_000.0),
            balance: 15_000.0,
            ..card.clone()
        };
        let result = utilization_from_debts(&[card, loan]).unwrap();
        assert_eq!(result.utilization, 0.3);
        assert_eq!(result.per_account.len(), 1);
    }
}
