use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::{ok, today, ApiResponse, ScopeQuery};
use crate::accounting::cash::{
    bank_params, cash_control_report, cashier_params, vault_params, CashControlReport, CashCount,
    CashEndingContext, DenominationCount, DenominationTotal, VaultDirection,
};
use crate::backend::extract::{JsonBody, QueryParams};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::CashLocation;
use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize)]
pub struct EndingHeader {
    pub company_id: Uuid,
    pub store_id: Option<Uuid>,
    pub location_id: Uuid,
    pub currency_id: Uuid,
    pub record_date: Option<NaiveDate>,
    pub created_by: Uuid,
}

impl EndingHeader {
    fn context(&self) -> CashEndingContext {
        CashEndingContext {
            company_id: self.company_id,
            store_id: self.store_id,
            location_id: self.location_id,
            currency_id: self.currency_id,
            record_date: self.record_date.unwrap_or_else(today),
            created_by: self.created_by,
            created_at: chrono::Local::now().naive_local(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CountRequest {
    #[serde(flatten)]
    pub header: EndingHeader,
    pub denominations: Vec<DenominationCount>,
}

#[derive(Debug, Deserialize)]
pub struct VaultRequest {
    #[serde(flatten)]
    pub header: EndingHeader,
    pub direction: VaultDirection,
    pub denominations: Vec<DenominationCount>,
}

#[derive(Debug, Deserialize)]
pub struct BankRequest {
    #[serde(flatten)]
    pub header: EndingHeader,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct EndingRecorded {
    pub total: Decimal,
    pub breakdown: Vec<DenominationTotal>,
    pub result: Value,
}

pub async fn list_cash_locations(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<Vec<CashLocation>>>> {
    let company_id = q.company_id()?;
    let store_id = q.store_id()?;
    Ok(ok(queries::get_cash_locations(
        state.db.as_ref(),
        company_id,
        store_id,
        q.location_type(),
    )
    .await?))
}

/// Book balance against last counted amount for every cash location.
pub async fn cash_control(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<CashControlReport>>> {
    let company_id = q.company_id()?;
    let store_id = q.store_id()?;
    let locations =
        queries::get_cash_locations(state.db.as_ref(), company_id, store_id, q.location_type())
            .await?;
    Ok(ok(cash_control_report(
        locations.iter().map(CashLocation::balance).collect(),
    )))
}

pub async fn cashier_ending(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CountRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<EndingRecorded>>)> {
    let count = CashCount {
        denominations: req.denominations,
    };
    let params = cashier_params(&req.header.context(), &count)?;
    let total = count.total()?;
    let breakdown = count.breakdown()?;
    let result = queries::insert_cashier_amount_lines(state.db.as_ref(), params).await?;
    info!(location_id = %req.header.location_id, %total, "cashier ending recorded");
    Ok((
        StatusCode::CREATED,
        ok(EndingRecorded {
            total,
            breakdown,
            result,
        }),
    ))
}

pub async fn vault_ending(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<VaultRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<EndingRecorded>>)> {
    let count = CashCount {
        denominations: req.denominations,
    };
    let params = vault_params(&req.header.context(), req.direction, &count)?;
    let total = count.total()?;
    let breakdown = count.breakdown()?;
    let result = queries::vault_amount_insert(state.db.as_ref(), params).await?;
    info!(
        location_id = %req.header.location_id,
        direction = ?req.direction,
        %total,
        "vault movement recorded"
    );
    Ok((
        StatusCode::CREATED,
        ok(EndingRecorded {
            total,
            breakdown,
            result,
        }),
    ))
}

pub async fn bank_ending(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<BankRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<EndingRecorded>>)> {
    let params = bank_params(&req.header.context(), req.total_amount);
    let result = queries::bank_amount_insert_v2(state.db.as_ref(), params).await?;
    info!(location_id = %req.header.location_id, total = %req.total_amount, "bank balance recorded");
    Ok((
        StatusCode::CREATED,
        ok(EndingRecorded {
            total: req.total_amount,
            breakdown: Vec::new(),
            result,
        }),
    ))
}
