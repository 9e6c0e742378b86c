use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::{ok, ApiResponse, ScopeQuery};
use crate::accounting::depreciation::{DepreciationStatus, ScheduleRow};
use crate::backend::extract::{JsonBody, PathParam, QueryParams};
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::{FixedAsset, NewFixedAsset};
use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct AssetView {
    #[serde(flatten)]
    pub asset: FixedAsset,
    pub depreciation: DepreciationStatus,
}

#[derive(Debug, Serialize)]
pub struct AssetRegister {
    pub as_of: NaiveDate,
    pub assets: Vec<AssetView>,
    pub total_cost: Decimal,
    pub total_accumulated: Decimal,
    pub total_book_value: Decimal,
    pub monthly_depreciation: Decimal,
}

#[derive(Debug, Serialize)]
pub struct AssetSchedule {
    pub asset: FixedAsset,
    pub schedule: Vec<ScheduleRow>,
}

pub async fn list_assets(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ScopeQuery>,
) -> AppResult<Json<ApiResponse<AssetRegister>>> {
    let company_id = q.company_id()?;
    let store_id = q.store_id()?;
    let as_of = q.as_of()?;
    let assets = queries::list_fixed_assets(state.db.as_ref(), company_id, store_id).await?;

    let assets: Vec<AssetView> = assets
        .into_iter()
        .map(|asset| AssetView {
            depreciation: asset.straight_line().status(as_of),
            asset,
        })
        .collect();

    // fully depreciated assets no longer accrue
    let monthly_depreciation: Decimal = assets
        .iter()
        .filter(|a| !a.depreciation.fully_depreciated)
        .map(|a| a.depreciation.monthly_depreciation)
        .sum();

    Ok(ok(AssetRegister {
        as_of,
        total_cost: assets.iter().map(|a| a.asset.acquisition_cost).sum(),
        total_accumulated: assets.iter().map(|a| a.depreciation.accumulated_depreciation).sum(),
        total_book_value: assets.iter().map(|a| a.depreciation.book_value).sum(),
        monthly_depreciation,
        assets,
    }))
}

pub async fn create_asset(
    State(state): State<AppState>,
    JsonBody(new): JsonBody<NewFixedAsset>,
) -> AppResult<(StatusCode, Json<ApiResponse<FixedAsset>>)> {
    new.validate()?;
    let asset = queries::create_fixed_asset(state.db.as_ref(), new).await?;
    Ok((StatusCode::CREATED, ok(asset)))
}

pub async fn update_asset(
    State(state): State<AppState>,
    PathParam(asset_id): PathParam<Uuid>,
    JsonBody(changes): JsonBody<NewFixedAsset>,
) -> AppResult<Json<ApiResponse<FixedAsset>>> {
    changes.validate()?;
    Ok(ok(queries::update_fixed_asset(state.db.as_ref(), asset_id, changes).await?))
}

pub async fn delete_asset(
    State(state): State<AppState>,
    PathParam(asset_id): PathParam<Uuid>,
) -> AppResult<Json<ApiResponse<Uuid>>> {
    queries::delete_fixed_asset(state.db.as_ref(), asset_id).await?;
    Ok(ok(asset_id))
}

pub async fn asset_schedule(
    State(state): State<AppState>,
    PathParam(asset_id): PathParam<Uuid>,
) -> AppResult<Json<ApiResponse<AssetSchedule>>> {
    let asset = queries::get_fixed_asset(state.db.as_ref(), asset_id).await?;
    let schedule = asset.straight_line().schedule();
    Ok(ok(AssetSchedule { asset, schedule }))
}
