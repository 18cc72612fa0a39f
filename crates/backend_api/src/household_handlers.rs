use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use models::{Action, Feature, Household, HouseholdMember, Role};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, handlers::ApiJson, state::AppState, Result};

fn non_negative(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!("{} must be a non-negative number", field)))
    }
}

/// POST /api/household/permissions/check
#[derive(Debug, Deserialize)]
pub struct PermissionCheckRequest {
    member: HouseholdMember,
    feature: Feature,
    action: Action,
}

#[derive(Debug, Serialize)]
pub struct PermissionCheckResponse {
    allowed: bool,
}

pub async fn check_permission(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PermissionCheckRequest>,
) -> Result<impl IntoResponse> {
    let allowed = state.permissions.has_permission(&req.member, req.feature, req.action);
    Ok(Json(PermissionCheckResponse { allowed }))
}

/// POST /api/household/approvals/check
#[derive(Debug, Deserialize)]
pub struct ApprovalCheckRequest {
    member: HouseholdMember,
    amount: f64,
    household: Household,
}

#[derive(Debug, Serialize)]
pub struct ApprovalCheckResponse {
    requires_approval: bool,
}

pub async fn check_approval(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ApprovalCheckRequest>,
) -> Result<impl IntoResponse> {
    let amount = non_negative("amount", req.amount)?;
    let requires_approval = state.permissions.requires_approval(&req.member, amount, &req.household);
    Ok(Json(ApprovalCheckResponse { requires_approval }))
}

/// POST /api/household/limits/daily
#[derive(Debug, Deserialize)]
pub struct DailyLimitRequest {
    member: HouseholdMember,
    #[serde(alias = "todaySpendingSoFar", alias = "todaySpending")]
    today_spending: f64,
    #[serde(alias = "proposedAmount")]
    proposed_amount: f64,
}

pub async fn check_daily_limit(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DailyLimitRequest>,
) -> Result<impl IntoResponse> {
    let spent = non_negative("today_spending", req.today_spending)?;
    let proposed = non_negative("proposed_amount", req.proposed_amount)?;
    Ok(Json(state.permissions.check_daily_limit(&req.member, spent, proposed)))
}

/// POST /api/household/invites
#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    #[serde(alias = "householdId")]
    household_id: String,
    role: Role,
}

pub async fn create_invite(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateInviteRequest>,
) -> Result<impl IntoResponse> {
    let issued = state.invites.generate(&req.household_id, req.role)?;
    Ok((StatusCode::CREATED, Json(issued)))
}

/// POST /api/household/invites/validate
/// Always 200; an unusable token is reported in the body
#[derive(Debug, Deserialize)]
pub struct ValidateInviteRequest {
    token: String,
}

pub async fn validate_invite(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ValidateInviteRequest>,
) -> Result<impl IntoResponse> {
    Ok(Json(state.invites.validate(&req.token)))
}

#[derive(Debug, Serialize)]
pub struct VisibleFeaturesResponse {
    role: Role,
    features: Vec<Feature>,
}

/// GET /api/household/roles/:role/features
pub async fn visible_features(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<impl IntoResponse> {
    let role: Role = role
        .parse()
        .map_err(|r| ApiError::BadRequest(format!("Unknown role: {}", r)))?;
    let features = state.permissions.visible_features(role);
    Ok(Json(VisibleFeaturesResponse { role, features }))
}

/// POST /api/households/:household_id/members/:member_id/transactions/review
/// Reviews a proposed spend against the stored member and household
#[derive(Debug, Deserialize)]
pub struct TransactionReviewRequest {
    amount: f64,
    #[serde(default, alias = "todaySpending")]
    today_spending: f64,
}

pub async fn review_transaction(
    State(state): State<AppState>,
    Path((household_id, member_id)): Path<(String, String)>,
    ApiJson(req): ApiJson<TransactionReviewRequest>,
) -> Result<impl IntoResponse> {
    let amount = non_negative("amount", req.amount)?;
    let spent = non_negative("today_spending", req.today_spending)?;

    let record = state.repo.fetch_household(&household_id).await?;
    let member = state.repo.fetch_member(&household_id, &member_id).await?;
    let review = state.permissions.review_transaction(&member, &record.household, amount, spent);

    Ok(Json(review))
}
