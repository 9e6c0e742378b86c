use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounting::cash::LocationBalance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashLocation {
    pub cash_location_id: Uuid,
    pub location_name: String,
    pub location_type: String, // cashier/vault/bank
    pub store_id: Option<Uuid>,
    pub currency_code: Option<String>,
    #[serde(default)]
    pub book_amount: Decimal,   // journal balance
    #[serde(default)]
    pub actual_amount: Decimal, // last counted amount
}

impl CashLocation {
    pub fn balance(&self) -> LocationBalance {
        LocationBalance {
            cash_location_id: self.cash_location_id,
            location_name: self.location_name.clone(),
            location_type: self.location_type.clone(),
            book_amount: self.book_amount,
            actual_amount: self.actual_amount,
        }
    }
}
