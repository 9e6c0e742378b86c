use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: Uuid,
    pub store_name: String,
    pub store_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: Uuid,
    pub company_name: String,
    pub role: Option<String>,
    #[serde(default)]
    pub stores: Vec<Store>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCompanies {
    pub user_id: Uuid,
    pub user_first_name: Option<String>,
    pub user_last_name: Option<String>,
    #[serde(default)]
    pub companies: Vec<Company>,
}

impl UserCompanies {
    pub fn company(&self, company_id: Uuid) -> Option<&Company> {
        self.companies.iter().find(|c| c.company_id == company_id)
    }
}
