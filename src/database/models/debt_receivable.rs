use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounting::debt::{DebtDirection, OpenDebt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtReceivable {
    pub debt_id: Uuid,
    pub company_id: Uuid,
    pub store_id: Option<Uuid>,
    pub counterparty_id: Uuid,
    pub direction: DebtDirection,
    pub category: Option<String>, // account/note/loan/...
    pub original_amount: Decimal,
    pub remaining_amount: Decimal,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl DebtReceivable {
    pub fn open_debt(&self) -> OpenDebt {
        OpenDebt {
            direction: self.direction,
            remaining_amount: self.remaining_amount,
            due_date: self.due_date,
        }
    }
}
