use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counterparty {
    pub counterparty_id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub counterparty_type: Option<String>, // customer/supplier/employee/...
    #[serde(default)]
    pub is_internal: bool,
    pub linked_company_id: Option<Uuid>,
}
