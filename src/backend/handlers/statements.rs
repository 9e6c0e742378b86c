use axum::extract::State;
use axum::Json;
use tracing::debug;

use super::{ok, ApiResponse, ScopeQuery};
use crate::accounting::statements::{BalanceSheet, IncomeStatement};
use crate::backend::extract::QueryParams;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::error::AppResult;

pub async fn balance_sheet(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<BalanceSheet>>> {
    let company_id = q.company_id()?;
    let store_id = q.store_id()?;
    let (start, end) = q.period()?;
    let rows = queries::get_balance_sheet(state.db.as_ref(), company_id, store_id, start, end).await?;
    debug!(%company_id, rows = rows.len(), "balance sheet rows");
    Ok(ok(BalanceSheet::from_rows(rows)))
}

pub async fn income_statement(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<IncomeStatement>>> {
    let company_id = q.company_id()?;
    let store_id = q.store_id()?;
    let (start, end) = q.period()?;
    let rows =
        queries::get_income_statement(state.db.as_ref(), company_id, store_id, start, end).await?;
    debug!(%company_id, rows = rows.len(), "income statement rows");
    Ok(ok(IncomeStatement::from_rows(rows)))
}
