use models::{round2, round4, Debt, DebtSummary};

use crate::credit::utilization_from_debts;
use crate::error::Result;
use crate::payoff::validate_debt;

/// Totals over the debts that still carry a balance.
pub fn summarize_debts(debts: &[Debt]) -> Result<DebtSummary> {
    for debt in debts {
        validate_debt(debt)?;
    }
    let active: Vec<&Debt> = debts.iter().filter(|d| !d.is_paid_off()).collect();

    let total_balance: f64 = active.iter().map(|d| d.balance).sum();
    let total_minimum_payment: f64 = active.iter().map(|d| d.minimum_payment).sum();
    let weighted_average_rate = if total_balance > 0.0 {
        active.iter().map(|d| d.balance * d.interest_rate).sum::<f64>() / total_balance
    } else {
        0.0
    };
    let highest_rate_debt_id = active
        .iter()
        .max_by(|a, b| a.interest_rate.total_cmp(&b.interest_rate).then_with(|| b.id.cmp(&a.id)))
        .map(|d| d.id.clone());

    Ok(DebtSummary {
        total_balance: round2(total_balance),
        total_minimum_payment: round2(total_minimum_payment),
        weighted_average_rate: round4(weighted_average_rate),
        active_debts: active.len(),
        highest_rate_debt_id,
        credit_utilization: utilization_from_debts(debts)?.utilization,
    })
}
