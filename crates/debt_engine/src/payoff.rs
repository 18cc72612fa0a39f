use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Local, Months, NaiveDate};
use models::{round2, Debt, FreedomDate, PayoffScheduleEntry, PayoffStrategy, Strategy, StrategyComparison};

use crate::error::{DebtError, Result};

/// Default simulation cap: 50 years.
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Month-by-month amortization simulator.
///
/// Interest is simple monthly compounding: each month every open balance
/// grows by `balance * rate / 100 / 12` before any payment is applied.
/// All amounts are rounded to cents after every step, so a debt that is
/// paid off lands on exactly `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct PayoffEngine {
    max_months: u32,
}

impl Default for PayoffEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MONTHS)
    }
}

/// A debt while it is being simulated.
#[derive(Debug)]
struct OpenDebt {
    id: String,
    balance: f64,
    rate: f64,
    minimum: f64,
}

impl PayoffEngine {
    pub fn new(max_months: u32) -> Self {
        Self { max_months }
    }

    pub fn max_months(&self) -> u32 {
        self.max_months
    }

    /// Simulates paying off `debts` with a fixed `monthly_budget`, sending
    /// everything above the minimums to the highest-priority debt for `strategy`.
    pub fn simulate(&self, debts: &[Debt], monthly_budget: f64, strategy: Strategy) -> Result<PayoffStrategy> {
        validate_debts(debts)?;
        if !monthly_budget.is_finite() || monthly_budget <= 0.0 {
            return Err(DebtError::InvalidInput(format!(
                "monthly budget must be positive, got {}",
                monthly_budget
            )));
        }
        let budget = round2(monthly_budget);

        let mut open: Vec<OpenDebt> = debts
            .iter()
            .filter(|d| !d.is_paid_off())
            .map(|d| OpenDebt {
                id: d.id.clone(),
                balance: round2(d.balance),
                rate: d.interest_rate,
                minimum: round2(d.minimum_payment),
            })
            .collect();
        if open.is_empty() {
            return Err(DebtError::InvalidInput("no debt has an outstanding balance".to_string()));
        }

        let required = round2(open.iter().map(|d| d.minimum).sum());
        if budget < required {
            return Err(DebtError::InsufficientBudget { budget, required });
        }

        // Priority is fixed from the starting snapshot.
        open.sort_by(|a, b| priority(strategy, a, b));

        let mut schedule: Vec<PayoffScheduleEntry> = Vec::new();
        let mut payoff_order: Vec<String> = Vec::with_capacity(open.len());
        let mut total_interest = 0.0;
        let mut total_paid = 0.0;
        let mut month: u32 = 0;

        while open.iter().any(|d| d.balance > 0.0) {
            month += 1;
            if month > self.max_months {
                tracing::debug!(
                    strategy = %strategy,
                    max_months = self.max_months,
                    "payoff simulation hit the month cap"
                );
                return Err(DebtError::PayoffNotConverging { months: self.max_months });
            }

            let touched: Vec<bool> = open.iter().map(|d| d.balance > 0.0).collect();
            let mut interest = vec![0.0; open.len()];
            let mut paid = vec![0.0; open.len()];

            // 1. accrue interest
            for (i, debt) in open.iter_mut().enumerate() {
                if !touched[i] {
                    continue;
                }
                interest[i] = round2(debt.balance * (debt.rate / 100.0) / 12.0);
                debt.balance = round2(debt.balance + interest[i]);
            }

            // 2. minimums, capped at what is owed
            let mut remaining = budget;
            for (i, debt) in open.iter_mut().enumerate() {
                if !touched[i] {
                    continue;
                }
                let payment = debt.minimum.min(debt.balance);
                debt.balance = round2(debt.balance - payment);
                paid[i] = round2(paid[i] + payment);
                remaining = round2(remaining - payment);
                if debt.balance <= 0.0 {
                    debt.balance = 0.0;
                    payoff_order.push(debt.id.clone());
                }
            }

            // 3. leftover goes down the priority list, rolling over within the month
            for (i, debt) in open.iter_mut().enumerate() {
                if remaining <= 0.0 {
                    break;
                }
                if debt.balance <= 0.0 {
                    continue;
                }
                let payment = remaining.min(debt.balance);
                debt.balance = round2(debt.balance - payment);
                paid[i] = round2(paid[i] + payment);
                remaining = round2(remaining - payment);
                if debt.balance <= 0.0 {
                    debt.balance = 0.0;
                    payoff_order.push(debt.id.clone());
                }
            }

            // 4. one entry per debt that was open at the start of the month
            for (i, debt) in open.iter().enumerate() {
                if !touched[i] {
                    continue;
                }
                total_interest += interest[i];
                total_paid += paid[i];
                schedule.push(PayoffScheduleEntry {
                    month,
                    debt_id: debt.id.clone(),
                    payment: paid[i],
                    interest: interest[i],
                    // negative when the payment does not cover the interest
                    principal: round2(paid[i] - interest[i]),
                    remaining_balance: debt.balance,
                });
            }
        }

        let result = PayoffStrategy {
            strategy,
            schedule,
            total_interest: round2(total_interest),
            total_paid: round2(total_paid),
            total_months: month,
            payoff_order,
        };
        tracing::debug!(
            strategy = %strategy,
            months = result.total_months,
            total_interest = result.total_interest,
            "payoff simulation finished"
        );
        Ok(result)
    }

    /// Runs both orderings. No winner is picked; the deltas are snowball minus avalanche.
    pub fn compare(&self, debts: &[Debt], monthly_budget: f64) -> Result<StrategyComparison> {
        let avalanche = self.simulate(debts, monthly_budget, Strategy::Avalanche)?;
        let snowball = self.simulate(debts, monthly_budget, Strategy::Snowball)?;
        let interest_saved = round2(snowball.total_interest - avalanche.total_interest);
        let months_saved = i64::from(snowball.total_months) - i64::from(avalanche.total_months);

        Ok(StrategyComparison {
            avalanche,
            snowball,
            interest_saved,
            months_saved,
        })
    }

    /// Projects the debt-free date from today's local date.
    pub fn freedom_date(&self, debts: &[Debt], monthly_budget: f64, strategy_name: &str) -> Result<FreedomDate> {
        let today = Local::now().date_naive();
        self.freedom_date_from(today, debts, monthly_budget, strategy_name)
    }

    pub fn freedom_date_from(
        &self,
        today: NaiveDate,
        debts: &[Debt],
        monthly_budget: f64,
        strategy_name: &str,
    ) -> Result<FreedomDate> {
        let strategy = parse_strategy(strategy_name)?;
        let plan = self.simulate(debts, monthly_budget, strategy)?;
        let freedom_date = today
            .checked_add_months(Months::new(plan.total_months))
            .ok_or_else(|| DebtError::InvalidInput(format!("freedom date out of range after {} months", plan.total_months)))?;

        Ok(FreedomDate {
            freedom_date,
            months: plan.total_months,
            plan,
        })
    }
}

pub fn parse_strategy(name: &str) -> Result<Strategy> {
    name.parse::<Strategy>().map_err(|_| DebtError::UnknownStrategy(name.to_string()))
}

/// Simulates a payoff schedule with the default month cap.
pub fn simulate_payoff(debts: &[Debt], monthly_budget: f64, strategy: Strategy) -> Result<PayoffStrategy> {
    PayoffEngine::default().simulate(debts, monthly_budget, strategy)
}

pub fn compare_strategies(debts: &[Debt], monthly_budget: f64) -> Result<StrategyComparison> {
    PayoffEngine::default().compare(debts, monthly_budget)
}

pub fn freedom_date(debts: &[Debt], monthly_budget: f64, strategy_name: &str) -> Result<FreedomDate> {
    PayoffEngine::default().freedom_date(debts, monthly_budget, strategy_name)
}

fn priority(strategy: Strategy, a: &OpenDebt, b: &OpenDebt) -> Ordering {
    match strategy {
        Strategy::Avalanche => b
            .rate
            .total_cmp(&a.rate)
            .then(a.balance.total_cmp(&b.balance))
            .then_with(|| a.id.cmp(&b.id)),
        Strategy::Snowball => a
            .balance
            .total_cmp(&b.balance)
            .then(b.rate.total_cmp(&a.rate))
            .then_with(|| a.id.cmp(&b.id)),
    }
}

/// Rejects empty lists, duplicate ids and negative or non-finite amounts.
pub(crate) fn validate_debts(debts: &[Debt]) -> Result<()> {
    if debts.is_empty() {
        return Err(DebtError::InvalidInput("debt list is empty".to_string()));
    }
    let mut seen = HashSet::new();
    for debt in debts {
        validate_debt(debt)?;
        if !seen.insert(debt.id.as_str()) {
            return Err(DebtError::InvalidInput(format!("duplicate debt id '{}'", debt.id)));
        }
    }
    Ok(())
}

pub(crate) fn validate_debt(debt: &Debt) -> Result<()> {
    if debt.id.trim().is_empty() {
        return Err(DebtError::InvalidInput("debt id must not be empty".to_string()));
    }
    let amounts = [
        ("balance", debt.balance),
        ("interest_rate", debt.interest_rate),
        ("minimum_payment", debt.minimum_payment),
    ];
    for (field, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            return Err(DebtError::InvalidInput(format!(
                "debt '{}': {} must be a non-negative number, got {}",
                debt.id, field, value
            )));
        }
    }
    if let Some(limit) = debt.credit_limit {
        if !limit.is_finite() || limit < 0.0 {
            return Err(DebtError::InvalidInput(format!(
                "debt '{}': credit_limit must be a non-negative number, got {}",
                debt.id, limit
            )));
        }
    }
    if let Some(day) = debt.due_date {
        if !(1..=31).contains(&day) {
            return Err(DebtError::InvalidInput(format!(
                "debt '{}': due_date must be a day of month between 1 and 31, got {}",
                debt.id, day
            )));
        }
    }
    Ok(())
}
