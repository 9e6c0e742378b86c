use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals computed by the `get_debt_summary` function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtSummary {
    pub total_receivable: Decimal,
    pub total_payable: Decimal,
    pub overdue_receivable: Decimal,
    pub overdue_payable: Decimal,
    pub net_position: Decimal,
    pub counterparty_count: i64,
}
