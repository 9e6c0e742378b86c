use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::money::{checked_sum, round2, BALANCE_TOLERANCE};
use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DenominationCount {
    pub denomination_id: Uuid,
    pub value: Decimal,
    pub quantity: i64,
}

impl DenominationCount {
    /// `None` when `value * quantity` does not fit in a `Decimal`.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.value.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DenominationTotal {
    pub denomination_id: Uuid,
    pub value: Decimal,
    pub quantity: i64,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashCount {
    pub denominations: Vec<DenominationCount>,
}

impl CashCount {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.denominations.is_empty() {
            return Err(ValidationError::EmptyCount);
        }
        let mut seen = HashSet::new();
        for d in &self.denominations {
            if d.value <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveValue(d.denomination_id.to_string()));
            }
            if d.quantity < 0 {
                return Err(ValidationError::NegativeQuantity(d.denomination_id.to_string()));
            }
            if !seen.insert(d.denomination_id) {
                return Err(ValidationError::DuplicateDenomination(d.denomination_id.to_string()));
            }
        }
        self.total().map(|_| ())
    }

    pub fn breakdown(&self) -> Result<Vec<DenominationTotal>, ValidationError> {
        self.denominations
            .iter()
            .map(|d| {
                Ok(DenominationTotal {
                    denomination_id: d.denomination_id,
                    value: d.value,
                    quantity: d.quantity,
                    subtotal: d.subtotal().ok_or(ValidationError::AmountOverflow)?,
                })
            })
            .collect()
    }

    pub fn total(&self) -> Result<Decimal, ValidationError> {
        let subtotals = self
            .denominations
            .iter()
            .map(DenominationCount::subtotal)
            .collect::<Option<Vec<_>>>()
            .ok_or(ValidationError::AmountOverflow)?;
        checked_sum(subtotals).ok_or(ValidationError::AmountOverflow)
    }

    fn deposit_lines(&self) -> Vec<Value> {
        self.denominations
            .iter()
            .map(|d| json!({ "denomination_id": d.denomination_id, "quantity": d.quantity }))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CashStatus {
    Balanced,
    Surplus,
    Shortage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variance {
    pub expected: Decimal,
    pub actual: Decimal,
    pub variance: Decimal,
    pub status: CashStatus,
}

/// Actual minus expected.
pub fn variance(actual: Decimal, expected: Decimal) -> Variance {
    let v = round2(actual - expected);
    let status = if v.abs() < BALANCE_TOLERANCE {
        CashStatus::Balanced
    } else if v > Decimal::ZERO {
        CashStatus::Surplus
    } else {
        CashStatus::Shortage
    };
    Variance {
        expected,
        actual,
        variance: v,
        status,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBalance {
    pub cash_location_id: Uuid,
    pub location_name: String,
    pub location_type: String,
    pub book_amount: Decimal,
    pub actual_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationVariance {
    #[serde(flatten)]
    pub location: LocationBalance,
    #[serde(flatten)]
    pub variance: Variance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashControlReport {
    pub locations: Vec<LocationVariance>,
    pub total_book: Decimal,
    pub total_actual: Decimal,
    pub total: Variance,
}

pub fn cash_control_report(locations: Vec<LocationBalance>) -> CashControlReport {
    let total_book: Decimal = locations.iter().map(|l| l.book_amount).sum();
    let total_actual: Decimal = locations.iter().map(|l| l.actual_amount).sum();
    let locations = locations
        .into_iter()
        .map(|location| LocationVariance {
            variance: variance(location.actual_amount, location.book_amount),
            location,
        })
        .collect();
    CashControlReport {
        locations,
        total_book,
        total_actual,
        total: variance(total_actual, total_book),
    }
}

/// Who, where and when for a cash-ending submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashEndingContext {
    pub company_id: Uuid,
    pub store_id: Option<Uuid>,
    pub location_id: Uuid,
    pub currency_id: Uuid,
    pub record_date: NaiveDate,
    pub created_by: Uuid,
    pub created_at: NaiveDateTime,
}

impl CashEndingContext {
    fn base_params(&self) -> serde_json::Map<String, Value> {
        let mut params = serde_json::Map::new();
        params.insert("p_company_id".into(), json!(self.company_id));
        params.insert("p_store_id".into(), json!(self.store_id));
        params.insert("p_location_id".into(), json!(self.location_id));
        params.insert("p_currency_id".into(), json!(self.currency_id));
        params.insert("p_record_date".into(), json!(self.record_date));
        params.insert("p_created_by".into(), json!(self.created_by));
        params.insert("p_created_at".into(), json!(self.created_at));
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultDirection {
    In,
    Out,
}

/// Parameters for `insert_cashier_amount_lines`.
pub fn cashier_params(ctx: &CashEndingContext, count: &CashCount) -> Result<Value, ValidationError> {
    count.validate()?;
    let mut params = ctx.base_params();
    params.insert("p_deposit".into(), Value::Array(count.deposit_lines()));
    Ok(Value::Object(params))
}

/// Parameters for `vault_amount_insert`.
pub fn vault_params(
    ctx: &CashEndingContext,
    direction: VaultDirection,
    count: &CashCount,
) -> Result<Value, ValidationError> {
    count.validate()?;
    let mut params = ctx.base_params();
    params.insert("p_debit".into(), json!(direction == VaultDirection::In));
    params.insert("p_credit".into(), json!(direction == VaultDirection::Out));
    params.insert("p_vault_amount_line_json".into(), Value::Array(count.deposit_lines()));
    Ok(Value::Object(params))
}

/// Parameters for `bank_amount_insert_v2`. Bank balances may be negative
/// (overdraft), so only the total is recorded.
pub fn bank_params(ctx: &CashEndingContext, total_amount: Decimal) -> Value {
    let mut params = ctx.base_params();
    params.insert("p_total_amount".into(), json!(total_amount));
    Value::Object(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(items: &[(i64, i64)]) -> CashCount {
        CashCount {
            denominations: items
                .iter()
                .map(|(value, quantity)| DenominationCount {
                    denomination_id: Uuid::new_v4(),
                    value: Decimal::new(*value, 0),
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    fn ctx() -> CashEndingContext {
        CashEndingContext {
            company_id: Uuid::new_v4(),
            store_id: Some(Uuid::new_v4()),
            location_id: Uuid::new_v4(),
            currency_id: Uuid::new_v4(),
            record_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            created_by: Uuid::new_v4(),
            created_at: NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_hms_opt(21, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn sums_per_denomination() {
        let c = count(&[(50_000, 3), (10_000, 12), (500, 0)]);
        let breakdown = c.breakdown().unwrap();
        assert_eq!(breakdown[0].subtotal, Decimal::new(150_000, 0));
        assert_eq!(breakdown[1].subtotal, Decimal::new(120_000, 0));
        assert_eq!(breakdown[2].subtotal, Decimal::ZERO);
        assert_eq!(c.total(), Ok(Decimal::new(270_000, 0)));
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(matches!(
            count(&[(0, 4)]).validate(),
            Err(ValidationError::NonPositiveValue(_))
        ));
        assert!(matches!(
            count(&[(-50, 1)]).validate(),
            Err(ValidationError::NonPositiveValue(_))
        ));
    }

    #[test]
    fn oversized_counts_are_rejected_not_panicking() {
        let huge = count(&[(10_000_000_000, 9_000_000_000_000_000_000)]);
        assert_eq!(huge.total(), Err(ValidationError::AmountOverflow));
        assert_eq!(huge.breakdown(), Err(ValidationError::AmountOverflow));
        assert_eq!(huge.validate(), Err(ValidationError::AmountOverflow));
        assert!(cashier_params(&ctx(), &huge).is_err());

        let mut many = count(&[(1, 1), (1, 1)]);
        for d in &mut many.denominations {
            d.value = Decimal::MAX;
        }
        assert_eq!(many.total(), Err(ValidationError::AmountOverflow));
    }

    #[test]
    fn rejects_negative_and_duplicate_denominations() {
        assert_eq!(CashCount::default().validate(), Err(ValidationError::EmptyCount));
        assert!(matches!(
            count(&[(100, -1)]).validate(),
            Err(ValidationError::NegativeQuantity(_))
        ));

        let mut dup = count(&[(100, 1)]);
        dup.denominations.push(dup.denominations[0]);
        assert!(matches!(dup.validate(), Err(ValidationError::DuplicateDenomination(_))));
    }

    #[test]
    fn variance_classification() {
        let v = variance(Decimal::new(10_050, 2), Decimal::new(100, 0));
        assert_eq!(v.variance, Decimal::new(50, 2));
        assert_eq!(v.status, CashStatus::Surplus);
        assert_eq!(variance(Decimal::new(90, 0), Decimal::new(100, 0)).status, CashStatus::Shortage);
        assert_eq!(
            variance(Decimal::new(100_004, 3), Decimal::new(100, 0)).status,
            CashStatus::Balanced
        );
    }

    #[test]
    fn control_report_totals() {
        let report = cash_control_report(vec![
            LocationBalance {
                cash_location_id: Uuid::new_v4(),
                location_name: "Front till".into(),
                location_type: "cashier".into(),
                book_amount: Decimal::new(500, 0),
                actual_amount: Decimal::new(480, 0),
            },
            LocationBalance {
                cash_location_id: Uuid::new_v4(),
                location_name: "Main vault".into(),
                location_type: "vault".into(),
                book_amount: Decimal::new(1_000, 0),
                actual_amount: Decimal::new(1_000, 0),
            },
        ]);
        assert_eq!(report.locations[0].variance.status, CashStatus::Shortage);
        assert_eq!(report.locations[1].variance.status, CashStatus::Balanced);
        assert_eq!(report.total.variance, Decimal::new(-20, 0));
        assert_eq!(report.total_book, Decimal::new(1_500, 0));
    }

    #[test]
    fn vault_params_set_direction_flags() {
        let params = vault_params(&ctx(), VaultDirection::Out, &count(&[(100, 2)])).unwrap();
        assert_eq!(params["p_debit"], json!(false));
        assert_eq!(params["p_credit"], json!(true));
        assert_eq!(params["p_vault_amount_line_json"][0]["quantity"], json!(2));
        assert_eq!(params["p_record_date"], json!("2024-05-02"));
    }

    #[test]
    fn cashier_params_reject_invalid_count() {
        assert!(cashier_params(&ctx(), &count(&[(100, -3)])).is_err());
        let params = cashier_params(&ctx(), &count(&[(100, 3), (5, 1)])).unwrap();
        assert_eq!(params["p_deposit"].as_array().unwrap().len(), 2);
    }
}
