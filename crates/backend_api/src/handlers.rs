use axum::{
    extract::{FromRequest, FromRequestParts, Path, State},
    response::IntoResponse,
    Json,
};
use debt_engine::{calculate_credit_utilization, estimate_credit_score, summarize_debts};
use models::{CreditFactors, Debt, DebtSummary, FreedomDate, PayoffStrategy, RevolvingAccount, Strategy, StrategyComparison};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState, Result};

/// JSON body extractor whose rejections use the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with the same rejection shape as `ApiJson`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DebtAction {
    PayoffAvalanche,
    PayoffSnowball,
    Compare,
    FreedomDate,
}

#[derive(Debug, Deserialize)]
pub struct DebtStrategyRequest {
    pub action: DebtAction,
    pub debts: Vec<Debt>,
    #[serde(alias = "monthlyBudget")]
    pub monthly_budget: f64,
    /// Strategy for `freedom-date`; avalanche when omitted
    #[serde(default, alias = "strategyName")]
    pub strategy: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DebtStrategyResponse {
    Plan(PayoffStrategy),
    Comparison(StrategyComparison),
    Freedom(FreedomDate),
}

/// POST /api/debts/strategy
/// Runs one payoff action selected by the `action` discriminator
pub async fn debt_strategy(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DebtStrategyRequest>,
) -> Result<impl IntoResponse> {
    let response = match req.action {
        DebtAction::PayoffAvalanche => {
            DebtStrategyResponse::Plan(state.engine.simulate(&req.debts, req.monthly_budget, Strategy::Avalanche)?)
        }
        DebtAction::PayoffSnowball => {
            DebtStrategyResponse::Plan(state.engine.simulate(&req.debts, req.monthly_budget, Strategy::Snowball)?)
        }
        DebtAction::Compare => DebtStrategyResponse::Comparison(state.engine.compare(&req.debts, req.monthly_budget)?),
        DebtAction::FreedomDate => {
            let strategy = req.strategy.as_deref().unwrap_or(Strategy::Avalanche.as_str());
            DebtStrategyResponse::Freedom(state.engine.freedom_date(&req.debts, req.monthly_budget, strategy)?)
        }
    };

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct DebtSummaryRequest {
    pub debts: Vec<Debt>,
}

/// POST /api/debts/summary
pub async fn debt_summary(ApiJson(req): ApiJson<DebtSummaryRequest>) -> Result<impl IntoResponse> {
    Ok(Json(summarize_debts(&req.debts)?))
}

/// POST /api/credit/score
/// Heuristic score estimate with the per-factor breakdown
pub async fn credit_score(ApiJson(factors): ApiJson<CreditFactors>) -> Result<impl IntoResponse> {
    Ok(Json(estimate_credit_score(&factors)?))
}

#[derive(Debug, Deserialize)]
pub struct UtilizationRequest {
    pub accounts: Vec<RevolvingAccount>,
}

/// POST /api/credit/utilization
pub async fn credit_utilization(ApiJson(req): ApiJson<UtilizationRequest>) -> Result<impl IntoResponse> {
    Ok(Json(calculate_credit_utilization(&req.accounts)?))
}

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub monthly_budget: f64,
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

fn default_strategy() -> String {
    Strategy::Avalanche.as_str().to_string()
}

#[derive(Debug, Serialize)]
pub struct DebtPlanResponse {
    pub user_id: String,
    pub summary: DebtSummary,
    pub freedom: FreedomDate,
}

/// GET /api/users/:user_id/debts/plan?monthly_budget=..&strategy=..
/// Loads the user's stored debts and projects their debt-free date
pub async fn user_debt_plan(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ApiQuery(query): ApiQuery<PlanQuery>,
) -> Result<impl IntoResponse> {
    let debts = state.repo.fetch_debts(&user_id).await?;
    let summary = summarize_debts(&debts)?;
    let freedom = state.engine.freedom_date(&debts, query.monthly_budget, &query.strategy)?;

    Ok(Json(DebtPlanResponse {
        user_id,
        summary,
        freedom,
    }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "debt-strategy-api"
    }))
}

/// POST /api/cache/invalidate
/// Drops cached household documents so edits on disk are picked up
pub async fn invalidate_cache(State(state): State<AppState>) -> impl IntoResponse {
    state.repo.invalidate_cache().await;

    Json(serde_json::json!({
        "status": "success",
        "message": "Cache invalidated. Fresh data will be loaded on next request."
    }))
}
