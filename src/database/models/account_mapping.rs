use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Links an account of ours to the account an internal counterparty books
/// the same transaction against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountMapping {
    pub mapping_id: Uuid,
    pub my_company_id: Uuid,
    pub counterparty_id: Uuid,
    pub my_account_id: Uuid,
    pub linked_account_id: Uuid,
    pub direction: Option<String>,
}
