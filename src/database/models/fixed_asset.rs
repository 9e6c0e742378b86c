use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounting::depreciation::{StraightLine, MAX_USEFUL_LIFE_YEARS};
use crate::accounting::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedAsset {
    pub asset_id: Uuid,
    pub company_id: Uuid,
    pub store_id: Option<Uuid>,
    pub asset_name: String,
    pub acquisition_date: NaiveDate,
    pub acquisition_cost: Decimal,
    #[serde(default)]
    pub salvage_value: Decimal,
    pub useful_life_years: i32,
    pub account_id: Option<Uuid>,
}

impl FixedAsset {
    pub fn straight_line(&self) -> StraightLine {
        StraightLine {
            acquisition_cost: self.acquisition_cost,
            salvage_value: self.salvage_value,
            useful_life_years: self.useful_life_years.max(0) as u32,
            acquisition_date: self.acquisition_date,
        }
    }
}

/// Body for creating or replacing an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFixedAsset {
    pub company_id: Uuid,
    pub store_id: Option<Uuid>,
    pub asset_name: String,
    pub acquisition_date: NaiveDate,
    pub acquisition_cost: Decimal,
    #[serde(default)]
    pub salvage_value: Decimal,
    pub useful_life_years: i32,
    pub account_id: Option<Uuid>,
}

impl NewFixedAsset {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.asset_name.trim().is_empty() {
            return Err(ValidationError::Invalid("asset name is required".into()));
        }
        if self.acquisition_cost <= Decimal::ZERO {
            return Err(ValidationError::Invalid("acquisition cost must be positive".into()));
        }
        if self.salvage_value < Decimal::ZERO || self.salvage_value > self.acquisition_cost {
            return Err(ValidationError::Invalid(
                "salvage value must be between zero and the acquisition cost".into(),
            ));
        }
        if self.useful_life_years <= 0 {
            return Err(ValidationError::Invalid("useful life must be at least one year".into()));
        }
        if self.useful_life_years as u32 > MAX_USEFUL_LIFE_YEARS {
            return Err(ValidationError::Invalid(format!(
                "useful life cannot exceed {MAX_USEFUL_LIFE_YEARS} years"
            )));
        }
        Ok(())
    }

    pub fn into_asset(self, asset_id: Uuid) -> FixedAsset {
        FixedAsset {
            asset_id,
            company_id: self.company_id,
            store_id: self.store_id,
            asset_name: self.asset_name.trim().to_string(),
            acquisition_date: self.acquisition_date,
            acquisition_cost: self.acquisition_cost,
            salvage_value: self.salvage_value,
            useful_life_years: self.useful_life_years,
            account_id: self.account_id,
        }
    }
}
