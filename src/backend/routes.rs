use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::{handlers, AppState};
use handlers::{assets, cash, context, debts, journal, statements};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/context", get(context::get_context))
        .route("/api/currencies", get(context::list_currencies))
        .route("/api/accounts", get(context::list_accounts))
        .route("/api/counterparties", get(context::list_counterparties))
        .route("/api/account-mappings", get(context::list_account_mappings))
        .route("/api/journal-entries/check", post(journal::check_journal))
        .route("/api/journal-entries", post(journal::create_journal))
        .route("/api/balance-sheet", get(statements::balance_sheet))
        .route("/api/income-statement", get(statements::income_statement))
        .route("/api/cash-locations", get(cash::list_cash_locations))
        .route("/api/cash-control", get(cash::cash_control))
        .route("/api/cash-ending/cashier", post(cash::cashier_ending))
        .route("/api/cash-ending/vault", post(cash::vault_ending))
        .route("/api/cash-ending/bank", post(cash::bank_ending))
        .route("/api/debts/summary", get(debts::debt_summary))
        .route("/api/debts/aging", get(debts::debt_aging))
        .route("/api/fixed-assets", get(assets::list_assets).post(assets::create_asset))
        .route(
            "/api/fixed-assets/:asset_id",
            put(assets::update_asset).delete(assets::delete_asset),
        )
        .route("/api/fixed-assets/:asset_id/schedule", get(assets::asset_schedule))
}
