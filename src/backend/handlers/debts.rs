use axum::extract::State;
use axum::Json;

use super::{ok, ApiResponse, ScopeQuery};
use crate::accounting::debt::{aging_report, AgingReport};
use crate::backend::extract::QueryParams;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::DebtSummary;
use crate::error::AppResult;

pub async fn debt_summary(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<DebtSummary>>> {
    let company_id = q.company_id()?;
    let store_id = q.store_id()?;
    Ok(ok(queries::get_debt_summary(state.db.as_ref(), company_id, store_id).await?))
}

pub async fn debt_aging(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<AgingReport>>> {
    let company_id = q.company_id()?;
    let store_id = q.store_id()?;
    let as_of = q.as_of()?;
    let debts = queries::list_debts_receivable(state.db.as_ref(), company_id, store_id).await?;
    Ok(ok(aging_report(debts.iter().map(|d| d.open_debt()), as_of)))
}
