use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    pub account_name: String,
    pub account_type: String,       // asset/liability/equity/income/expense
    pub category_tag: Option<String>, // cash/receivable/fixedasset/payable/...
    pub expense_nature: Option<String>,
}
