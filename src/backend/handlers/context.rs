use axum::extract::State;
use axum::Json;
use tracing::debug;

use super::{ok, ApiResponse, ScopeQuery};
use crate::backend::extract::QueryParams;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::{
    Account, AccountMapping, CompanyCurrency, Counterparty, UserCompanies,
};
use crate::error::{AppError, AppResult};

/// Companies and stores the user can act for. With `company_id`, also checks
/// that the user belongs to that company.
pub async fn get_context(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<UserCompanies>>> {
    let user_id = q.user_id()?;
    let companies = queries::get_user_companies_and_stores(state.db.as_ref(), user_id).await?;
    if let Some(company_id) = super::optional_uuid(&q.company_id, "company_id")? {
        if companies.company(company_id).is_none() {
            return Err(AppError::Forbidden(format!(
                "user {user_id} is not a member of company {company_id}"
            )));
        }
    }
    debug!(%user_id, companies = companies.companies.len(), "context loaded");
    Ok(ok(companies))
}

pub async fn list_currencies(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<Vec<CompanyCurrency>>>> {
    let company_id = q.company_id()?;
    Ok(ok(queries::get_company_currencies(state.db.as_ref(), company_id).await?))
}

pub async fn list_accounts(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<Vec<Account>>>> {
    Ok(ok(queries::list_accounts(state.db.as_ref(), q.account_type()).await?))
}

pub async fn list_counterparties(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<Vec<Counterparty>>>> {
    let company_id = q.company_id()?;
    Ok(ok(queries::list_counterparties(state.db.as_ref(), company_id).await?))
}

pub async fn list_account_mappings(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<Vec<AccountMapping>>>> {
    let company_id = q.company_id()?;
    let counterparty_id = q.counterparty_id()?;
    Ok(ok(
        queries::list_account_mappings(state.db.as_ref(), company_id, counterparty_id).await?,
    ))
}
