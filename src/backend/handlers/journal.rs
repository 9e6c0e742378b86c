use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ok, ApiResponse};
use crate::accounting::journal::{balance_check, BalanceCheck, JournalDraft, JournalLine};
use crate::backend::extract::JsonBody;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub lines: Vec<JournalLine>,
}

#[derive(Debug, Serialize)]
pub struct JournalCreated {
    pub balance: BalanceCheck,
    pub result: Value,
}

/// Totals and balance flag for a set of lines; nothing is stored.
pub async fn check_journal(
    JsonBody(req): JsonBody<CheckRequest>,
) -> AppResult<Json<ApiResponse<BalanceCheck>>> {
    Ok(ok(balance_check(&req.lines)?))
}

pub async fn create_journal(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<JournalDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<JournalCreated>>)> {
    let balance = draft.validate()?;
    let result = queries::insert_journal_with_everything(state.db.as_ref(), &draft, &balance).await?;
    Ok((StatusCode::CREATED, ok(JournalCreated { balance, result })))
}
