//! Balance sheet and income statement assembly.
//!
//! The remote functions return one row per account with its balance for the
//! period. Rows are grouped into statement sections by `account_type` and
//! `category_tag`; totals and ratios are computed here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::{approx_eq, round2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub account_id: Uuid,
    pub account_name: String,
    pub account_type: String,
    #[serde(default)]
    pub category_tag: Option<String>,
    #[serde(alias = "balance")]
    pub amount: Decimal,
}

impl StatementRow {
    fn tag(&self) -> String {
        self.category_tag.as_deref().unwrap_or_default().to_ascii_lowercase()
    }

    fn is_type(&self, t: &str) -> bool {
        self.account_type.eq_ignore_ascii_case(t)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    pub lines: Vec<StatementRow>,
    pub total: Decimal,
}

impl Section {
    fn push(&mut self, row: StatementRow) {
        self.total += row.amount;
        self.lines.push(row);
    }
}

fn is_long_term(tag: &str) -> bool {
    tag.starts_with("fixed")
        || tag.contains("long_term")
        || tag.contains("non_current")
        || tag.contains("noncurrent")
        || tag == "intangible"
        || tag == "investment"
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ratios {
    /// Liabilities over assets, percent.
    pub debt_ratio: Option<Decimal>,
    /// Equity over assets, percent.
    pub equity_ratio: Option<Decimal>,
    pub current_ratio: Option<Decimal>,
}

fn ratio(numerator: Decimal, denominator: Decimal, scale: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }
    Some(round2(numerator / denominator * scale))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub current_assets: Section,
    pub non_current_assets: Section,
    pub current_liabilities: Section,
    pub non_current_liabilities: Section,
    pub equity: Section,
    /// Income minus expense for the period, not yet closed to equity.
    pub current_period_earnings: Decimal,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub total_equity: Decimal,
    pub total_liabilities_and_equity: Decimal,
    pub is_balanced: bool,
    pub ratios: Ratios,
}

impl BalanceSheet {
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = StatementRow>,
    {
        let mut sheet = BalanceSheet::default();
        for row in rows {
            let tag = row.tag();
            if row.is_type("asset") {
                if is_long_term(&tag) {
                    sheet.non_current_assets.push(row);
                } else {
                    sheet.current_assets.push(row);
                }
            } else if row.is_type("liability") {
                if is_long_term(&tag) {
                    sheet.non_current_liabilities.push(row);
                } else {
                    sheet.current_liabilities.push(row);
                }
            } else if row.is_type("equity") {
                sheet.equity.push(row);
            } else if row.is_type("income") {
                sheet.current_period_earnings += row.amount;
            } else if row.is_type("expense") {
                sheet.current_period_earnings -= row.amount;
            }
        }

        sheet.total_assets = sheet.current_assets.total + sheet.non_current_assets.total;
        sheet.total_liabilities =
            sheet.current_liabilities.total + sheet.non_current_liabilities.total;
        sheet.total_equity = sheet.equity.total + sheet.current_period_earnings;
        sheet.total_liabilities_and_equity = sheet.total_liabilities + sheet.total_equity;
        sheet.is_balanced = approx_eq(sheet.total_assets, sheet.total_liabilities_and_equity);

        let hundred = Decimal::ONE_HUNDRED;
        sheet.ratios = Ratios {
            debt_ratio: ratio(sheet.total_liabilities, sheet.total_assets, hundred),
            equity_ratio: ratio(sheet.total_equity, sheet.total_assets, hundred),
            current_ratio: ratio(
                sheet.current_assets.total,
                sheet.current_liabilities.total,
                Decimal::ONE,
            ),
        };
        sheet
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncomeStatement {
    pub revenue: Section,
    pub cost_of_sales: Section,
    pub operating_expenses: Section,
    pub other_income: Section,
    pub other_expenses: Section,
    pub gross_profit: Decimal,
    pub operating_income: Decimal,
    pub net_income: Decimal,
    /// Percent of revenue.
    pub gross_margin: Option<Decimal>,
    pub net_margin: Option<Decimal>,
}

fn is_cost_of_sales(tag: &str) -> bool {
    matches!(tag, "cogs" | "cost_of_sales" | "cost_of_goods_sold")
}

fn is_non_operating(tag: &str) -> bool {
    tag.starts_with("other") || tag.contains("non_operating")
}

impl IncomeStatement {
    /// Rows of other account types are ignored.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = StatementRow>,
    {
        let mut stmt = IncomeStatement::default();
        for row in rows {
            let tag = row.tag();
            if row.is_type("income") {
                if is_non_operating(&tag) {
                    stmt.other_income.push(row);
                } else {
                    stmt.revenue.push(row);
                }
            } else if row.is_type("expense") {
                if is_cost_of_sales(&tag) {
                    stmt.cost_of_sales.push(row);
                } else if is_non_operating(&tag) {
                    stmt.other_expenses.push(row);
                } else {
                    stmt.operating_expenses.push(row);
                }
            }
        }

        stmt.gross_profit = stmt.revenue.total - stmt.cost_of_sales.total;
        stmt.operating_income = stmt.gross_profit - stmt.operating_expenses.total;
        stmt.net_income =
            stmt.operating_income + stmt.other_income.total - stmt.other_expenses.total;
        stmt.gross_margin = ratio(stmt.gross_profit, stmt.revenue.total, Decimal::ONE_HUNDRED);
        stmt.net_margin = ratio(stmt.net_income, stmt.revenue.total, Decimal::ONE_HUNDRED);
        stmt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(account_type: &str, tag: Option<&str>, amount: i64) -> StatementRow {
        StatementRow {
            account_id: Uuid::new_v4(),
            account_name: format!("{account_type}/{}", tag.unwrap_or("-")),
            account_type: account_type.into(),
            category_tag: tag.map(str::to_string),
            amount: Decimal::new(amount, 0),
        }
    }

    #[test]
    fn balance_sheet_groups_and_balances() {
        let sheet = BalanceSheet::from_rows(vec![
            row("asset", Some("cash"), 400),
            row("asset", Some("receivable"), 200),
            row("asset", Some("fixedasset"), 400),
            row("liability", Some("payable"), 300),
            row("liability", Some("long_term_loan"), 200),
            row("equity", None, 400),
            row("income", None, 150),
            row("expense", None, 50),
        ]);

        assert_eq!(sheet.current_assets.total, Decimal::new(600, 0));
        assert_eq!(sheet.non_current_assets.total, Decimal::new(400, 0));
        assert_eq!(sheet.total_liabilities, Decimal::new(500, 0));
        assert_eq!(sheet.current_period_earnings, Decimal::new(100, 0));
        assert_eq!(sheet.total_equity, Decimal::new(500, 0));
        assert!(sheet.is_balanced);

        assert_eq!(sheet.ratios.debt_ratio, Some(Decimal::new(50, 0)));
        assert_eq!(sheet.ratios.equity_ratio, Some(Decimal::new(50, 0)));
        assert_eq!(sheet.ratios.current_ratio, Some(Decimal::new(2, 0)));
    }

    #[test]
    fn ratios_are_none_without_denominator() {
        let sheet = BalanceSheet::from_rows(vec![row("equity", None, 100)]);
        assert_eq!(sheet.ratios, Ratios::default());
        assert!(!sheet.is_balanced);
    }

    #[test]
    fn current_ratio_rounds_to_two_places() {
        let sheet = BalanceSheet::from_rows(vec![
            row("asset", Some("cash"), 100),
            row("liability", Some("payable"), 300),
        ]);
        assert_eq!(sheet.ratios.current_ratio, Some(Decimal::new(33, 2)));
    }

    #[test]
    fn income_statement_margins() {
        let stmt = IncomeStatement::from_rows(vec![
            row("income", Some("sales"), 1_000),
            row("income", Some("other_income"), 50),
            row("expense", Some("cogs"), 400),
            row("expense", Some("salary"), 300),
            row("expense", Some("other_expense"), 50),
            row("asset", Some("cash"), 999),
        ]);
        assert_eq!(stmt.gross_profit, Decimal::new(600, 0));
        assert_eq!(stmt.operating_income, Decimal::new(300, 0));
        assert_eq!(stmt.net_income, Decimal::new(300, 0));
        assert_eq!(stmt.gross_margin, Some(Decimal::new(60, 0)));
        assert_eq!(stmt.net_margin, Some(Decimal::new(30, 0)));
    }

    #[test]
    fn income_statement_without_revenue_has_no_margins() {
        let stmt = IncomeStatement::from_rows(vec![row("expense", Some("rent"), 100)]);
        assert_eq!(stmt.net_income, Decimal::new(-100, 0));
        assert_eq!(stmt.gross_margin, None);
    }

    #[test]
    fn rows_accept_balance_alias() {
        let id = Uuid::new_v4();
        let row: StatementRow = serde_json::from_value(serde_json::json!({
            "account_id": id,
            "account_name": "Cash",
            "account_type": "asset",
            "balance": 12.5,
        }))
        .unwrap();
        assert_eq!(row.amount, Decimal::new(125, 1));
        assert_eq!(row.category_tag, None);
    }
}
