use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Denomination {
    pub denomination_id: Uuid,
    pub value: Decimal,
    #[serde(rename = "type")]
    pub kind: Option<String>, // bill/coin
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyCurrency {
    pub currency_id: Uuid,
    pub currency_code: String,
    pub currency_name: Option<String>,
    pub symbol: Option<String>,
    #[serde(default)]
    pub is_base: bool,
    #[serde(default)]
    pub denominations: Vec<Denomination>,
}
