use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::accounting::journal::{BalanceCheck, JournalDraft};
use crate::accounting::statements::StatementRow;
use crate::database::models::{
    Account, AccountMapping, CashLocation, CompanyCurrency, Counterparty, DebtReceivable,
    DebtSummary, FixedAsset, NewFixedAsset, UserCompanies,
};

use super::{Backend, DbError, TableQuery};

/*
One function per remote table query or RPC. Functions decode into the
models and unwrap the `{ success, data, error }` envelope some RPCs use.
 */

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, DbError> {
    Ok(serde_json::from_value(value)?)
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, DbError> {
    rows.into_iter().map(decode).collect()
}

/// Strips the `{ "success": bool, "data": .., "error": .. }` envelope.
/// A `success: false` body becomes `DbError::Rejected`.
pub fn unwrap_rpc(value: Value) -> Result<Value, DbError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Ok(other),
    };
    match map.get("success").and_then(Value::as_bool) {
        Some(false) => {
            let message = map
                .get("error")
                .or_else(|| map.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("request was rejected")
                .to_string();
            Err(DbError::Rejected(message))
        }
        Some(true) => Ok(map.remove("data").unwrap_or(Value::Null)),
        None => Ok(Value::Object(map)),
    }
}

fn rpc_list(value: Value) -> Result<Vec<Value>, DbError> {
    match unwrap_rpc(value)? {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![other]),
    }
}

fn rpc_single(value: Value, what: &str) -> Result<Value, DbError> {
    match unwrap_rpc(value)? {
        Value::Array(rows) => rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound(what.to_string())),
        Value::Null => Err(DbError::NotFound(what.to_string())),
        other => Ok(other),
    }
}

/*========== Context ===========*/

pub async fn get_user_companies_and_stores(
    db: &dyn Backend,
    user_id: Uuid,
) -> Result<UserCompanies, DbError> {
    let value = db
        .rpc("get_user_companies_and_stores", json!({ "p_user_id": user_id }))
        .await?;
    decode(rpc_single(value, "user")?)
}

pub async fn get_company_currencies(
    db: &dyn Backend,
    company_id: Uuid,
) -> Result<Vec<CompanyCurrency>, DbError> {
    let value = db
        .rpc("get_company_currencies", json!({ "p_company_id": company_id }))
        .await?;
    decode_rows(rpc_list(value)?)
}

/*========== Accounts & counterparties ===========*/

pub async fn list_accounts(
    db: &dyn Backend,
    account_type: Option<&str>,
) -> Result<Vec<Account>, DbError> {
    let q = TableQuery::new("accounts")
        .eq_opt("account_type", account_type)
        .order("account_name", true);
    decode_rows(db.select(&q).await?)
}

pub async fn list_counterparties(
    db: &dyn Backend,
    company_id: Uuid,
) -> Result<Vec<Counterparty>, DbError> {
    let q = TableQuery::new("counterparties")
        .eq("company_id", company_id)
        .order("name", true);
    decode_rows(db.select(&q).await?)
}

pub async fn list_account_mappings(
    db: &dyn Backend,
    company_id: Uuid,
    counterparty_id: Option<Uuid>,
) -> Result<Vec<AccountMapping>, DbError> {
    let q = TableQuery::new("account_mapping")
        .eq("my_company_id", company_id)
        .eq_opt("counterparty_id", counterparty_id);
    decode_rows(db.select(&q).await?)
}

/*========== Journal ===========*/

/// Returns whatever the function reports back (usually the new journal id).
pub async fn insert_journal_with_everything(
    db: &dyn Backend,
    draft: &JournalDraft,
    balance: &BalanceCheck,
) -> Result<Value, DbError> {
    let value = db
        .rpc("insert_journal_with_everything", draft.to_rpc_params(balance))
        .await?;
    let result = unwrap_rpc(value)?;
    info!(company_id = %draft.company_id, lines = draft.lines.len(), "journal entry inserted");
    Ok(result)
}

/*========== Statements ===========*/

fn period_params(
    company_id: Uuid,
    store_id: Option<Uuid>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Value {
    json!({
        "p_company_id": company_id,
        "p_store_id": store_id,
        "p_start_date": start_date,
        "p_end_date": end_date,
    })
}

pub async fn get_balance_sheet(
    db: &dyn Backend,
    company_id: Uuid,
    store_id: Option<Uuid>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<StatementRow>, DbError> {
    let value = db
        .rpc(
            "get_balance_sheet",
            period_params(company_id, store_id, start_date, end_date),
        )
        .await?;
    decode_rows(rpc_list(value)?)
}

pub async fn get_income_statement(
    db: &dyn Backend,
    company_id: Uuid,
    store_id: Option<Uuid>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<StatementRow>, DbError> {
    let value = db
        .rpc(
            "get_income_statement",
            period_params(company_id, store_id, start_date, end_date),
        )
        .await?;
    decode_rows(rpc_list(value)?)
}

/*========== Cash ===========*/

pub async fn get_cash_locations(
    db: &dyn Backend,
    company_id: Uuid,
    store_id: Option<Uuid>,
    location_type: Option<&str>,
) -> Result<Vec<CashLocation>, DbError> {
    let value = db
        .rpc(
            "get_cash_locations",
            json!({
                "p_company_id": company_id,
                "p_store_id": store_id,
                "p_location_type": location_type,
            }),
        )
        .await?;
    decode_rows(rpc_list(value)?)
}

pub async fn insert_cashier_amount_lines(db: &dyn Backend, params: Value) -> Result<Value, DbError> {
    unwrap_rpc(db.rpc("insert_cashier_amount_lines", params).await?)
}

pub async fn vault_amount_insert(db: &dyn Backend, params: Value) -> Result<Value, DbError> {
    unwrap_rpc(db.rpc("vault_amount_insert", params).await?)
}

pub async fn bank_amount_insert_v2(db: &dyn Backend, params: Value) -> Result<Value, DbError> {
    unwrap_rpc(db.rpc("bank_amount_insert_v2", params).await?)
}

/*========== Debts ===========*/

pub async fn get_debt_summary(
    db: &dyn Backend,
    company_id: Uuid,
    store_id: Option<Uuid>,
) -> Result<DebtSummary, DbError> {
    let value = db
        .rpc(
            "get_debt_summary",
            json!({ "p_company_id": company_id, "p_store_id": store_id }),
        )
        .await?;
    match unwrap_rpc(value)? {
        Value::Null => Ok(DebtSummary::default()),
        Value::Array(rows) => rows.into_iter().next().map(decode).unwrap_or(Ok(DebtSummary::default())),
        other => decode(other),
    }
}

pub async fn list_debts_receivable(
    db: &dyn Backend,
    company_id: Uuid,
    store_id: Option<Uuid>,
) -> Result<Vec<DebtReceivable>, DbError> {
    let q = TableQuery::new("debts_receivable")
        .eq("company_id", company_id)
        .eq_opt("store_id", store_id)
        .order("due_date", true);
    decode_rows(db.select(&q).await?)
}

/*========== Fixed assets ===========*/

pub async fn list_fixed_assets(
    db: &dyn Backend,
    company_id: Uuid,
    store_id: Option<Uuid>,
) -> Result<Vec<FixedAsset>, DbError> {
    let q = TableQuery::new("fixed_assets")
        .eq("company_id", company_id)
        .eq_opt("store_id", store_id)
        .order("acquisition_date", true);
    decode_rows(db.select(&q).await?)
}

pub async fn get_fixed_asset(db: &dyn Backend, asset_id: Uuid) -> Result<FixedAsset, DbError> {
    let q = TableQuery::new("fixed_assets").eq("asset_id", asset_id).limit(1);
    db.select(&q)
        .await?
        .into_iter()
        .next()
        .map(decode)
        .unwrap_or_else(|| Err(DbError::NotFound(format!("fixed asset {asset_id}"))))
}

// Create asset; the id is assigned here so the row can be returned even when
// the backend answers without a representation.
pub async fn create_fixed_asset(db: &dyn Backend, new: NewFixedAsset) -> Result<FixedAsset, DbError> {
    let asset = new.into_asset(Uuid::new_v4());
    let inserted = db.insert("fixed_assets", serde_json::to_value(&asset)?).await?;
    info!(asset_id = %asset.asset_id, company_id = %asset.company_id, "fixed asset created");
    match inserted.into_iter().next() {
        Some(row) => decode(row),
        None => Ok(asset),
    }
}

// Update asset
pub async fn update_fixed_asset(
    db: &dyn Backend,
    asset_id: Uuid,
    changes: NewFixedAsset,
) -> Result<FixedAsset, DbError> {
    let asset = changes.into_asset(asset_id);
    let q = TableQuery::new("fixed_assets").eq("asset_id", asset_id);
    let updated = db.update(&q, serde_json::to_value(&asset)?).await?;
    let row = updated
        .into_iter()
        .next()
        .ok_or_else(|| DbError::NotFound(format!("fixed asset {asset_id}")))?;
    info!(%asset_id, "fixed asset updated");
    decode(row)
}

// Delete asset
pub async fn delete_fixed_asset(db: &dyn Backend, asset_id: Uuid) -> Result<(), DbError> {
    let q = TableQuery::new("fixed_assets").eq("asset_id", asset_id);
    if db.delete(&q).await?.is_empty() {
        return Err(DbError::NotFound(format!("fixed asset {asset_id}")));
    }
    info!(%asset_id, "fixed asset deleted");
    Ok(())
}
