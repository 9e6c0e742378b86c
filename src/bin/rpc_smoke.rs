//! Calls the read-only remote functions against the configured backend and
//! prints what comes back. Needs SMOKE_USER_ID and SMOKE_COMPANY_ID.

use anyhow::Context;
use dotenvy::dotenv;
use uuid::Uuid;

use company_accounting::accounting::debt::aging_report;
use company_accounting::accounting::statements::BalanceSheet;
use company_accounting::config::AppConfig;
use company_accounting::database::db::{connection::get_backend, queries};
use company_accounting::telemetry;

fn env_uuid(key: &str) -> anyhow::Result<Uuid> {
    let raw = std::env::var(key).with_context(|| format!("{key} must be set"))?;
    Uuid::parse_str(raw.trim()).with_context(|| format!("{key} is not a uuid"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::from_env()?;
    let client = get_backend(&config)?;
    let user_id = env_uuid("SMOKE_USER_ID")?;
    let company_id = env_uuid("SMOKE_COMPANY_ID")?;

    println!("\n--- get_user_companies_and_stores ---");
    let ctx = queries::get_user_companies_and_stores(&client, user_id).await?;
    println!("   > {} companies", ctx.companies.len());
    assert!(
        ctx.company(company_id).is_some(),
        "user is not a member of SMOKE_COMPANY_ID"
    );

    println!("\n--- get_company_currencies ---");
    let currencies = queries::get_company_currencies(&client, company_id).await?;
    for c in &currencies {
        println!("   > {} ({} denominations)", c.currency_code, c.denominations.len());
    }

    println!("\n--- list_accounts ---");
    let accounts = queries::list_accounts(&client, None).await?;
    println!("   > {} accounts", accounts.len());

    println!("\n--- get_cash_locations ---");
    let locations = queries::get_cash_locations(&client, company_id, None, None).await?;
    for l in &locations {
        println!("   > {} [{}] book {} / actual {}", l.location_name, l.location_type, l.book_amount, l.actual_amount);
    }

    println!("\n--- get_balance_sheet ---");
    let rows = queries::get_balance_sheet(&client, company_id, None, None, None).await?;
    let sheet = BalanceSheet::from_rows(rows);
    println!(
        "   > assets {} / liabilities {} / equity {} (balanced: {})",
        sheet.total_assets, sheet.total_liabilities, sheet.total_equity, sheet.is_balanced
    );
    println!("   > ratios {:?}", sheet.ratios);

    println!("\n--- get_debt_summary ---");
    let summary = queries::get_debt_summary(&client, company_id, None).await?;
    println!("   > {:?}", summary);

    println!("\n--- debts_receivable aging ---");
    let debts = queries::list_debts_receivable(&client, company_id, None).await?;
    let aging = aging_report(debts.iter().map(|d| d.open_debt()), chrono::Local::now().date_naive());
    println!("   > receivable overdue {} / payable overdue {}", aging.receivable.overdue, aging.payable.overdue);

    println!("\nSmoke run complete");
    Ok(())
}
