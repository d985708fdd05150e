use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::betting::{LedgerSummary, PlacedBet};
use crate::errors::{AppError, BetError};
use crate::models::{BetRecord, Outcome, ParseOutcomeError};
use crate::AppState;

use super::ApiResponse;

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct PlaceBetRequest {
    pub bankroll: Decimal,
    pub odds: Decimal,
    pub win_probability: Decimal,
}

#[derive(Deserialize)]
pub struct SettleBetRequest {
    pub outcome: String,
}

#[derive(Serialize)]
pub struct SettledBet {
    pub id: i64,
    pub outcome: Outcome,
    pub resulting_bankroll: Decimal,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/bets - all bets in placement order
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BetRecord>>>, AppError> {
    let bets = state.bets.list_bets().await?;
    Ok(Json(ApiResponse::ok(bets)))
}

/// POST /api/bets - size and record a new bet
pub async fn place(
    State(state): State<AppState>,
    payload: Result<Json<PlaceBetRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PlacedBet>>, AppError> {
    let Json(body) = payload?;
    let placed = state
        .bets
        .place_bet(body.bankroll, body.odds, body.win_probability)
        .await?;

    Ok(Json(ApiResponse::ok(placed)))
}

/// GET /api/bets/{id}
pub async fn detail(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<BetRecord>>, AppError> {
    let Path(id) = path?;
    let bet = state.bets.get_bet(id).await?;
    Ok(Json(ApiResponse::ok(bet)))
}

/// POST /api/bets/{id}/settle - set the outcome and recompute the bankroll
pub async fn settle(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SettleBetRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SettledBet>>, AppError> {
    let Path(id) = path?;
    let Json(body) = payload?;
    let outcome: Outcome = body
        .outcome
        .parse()
        .map_err(|e: ParseOutcomeError| BetError::InvalidOutcome(e.to_string()))?;

    let resulting_bankroll = state.bets.settle_bet(id, outcome).await?;

    Ok(Json(ApiResponse::ok(SettledBet {
        id,
        outcome,
        resulting_bankroll,
    })))
}

/// DELETE /api/bets/{id} - succeeds whether or not the bet existed
pub async fn remove(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let Path(id) = path?;
    state.bets.remove_bet(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// GET /api/bets/summary - counts and realized profit
pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LedgerSummary>>, AppError> {
    let summary = state.bets.summary().await?;
    Ok(Json(ApiResponse::ok(summary)))
}
