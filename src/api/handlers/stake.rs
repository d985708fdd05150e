use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::betting::StakeBreakdown;
use crate::errors::AppError;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct QuoteParams {
    pub bankroll: Decimal,
    pub odds: Decimal,
    pub win_probability: Decimal,
}

/// GET /api/stake/quote - recommended stake without recording a bet
pub async fn quote(
    State(state): State<AppState>,
    query: Result<Query<QuoteParams>, QueryRejection>,
) -> Result<Json<ApiResponse<StakeBreakdown>>, AppError> {
    let Query(params) = query?;
    let breakdown = state
        .bets
        .quote(params.bankroll, params.odds, params.win_probability)?;

    Ok(Json(ApiResponse::ok(breakdown)))
}
