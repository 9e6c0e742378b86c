use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::debt::DebtDirection;
use super::money::{checked_sum, Money, BALANCE_TOLERANCE};
use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtTerms {
    pub direction: DebtDirection,
    pub category: String,
    pub due_date: Option<NaiveDate>,
    pub interest_rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_id: Uuid,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
    pub description: Option<String>,
    pub cash_location_id: Option<Uuid>,
    pub counterparty_id: Option<Uuid>,
    pub debt: Option<DebtTerms>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalDraft {
    pub company_id: Uuid,
    pub store_id: Option<Uuid>,
    pub created_by: Uuid,
    pub entry_date: NaiveDate,
    pub description: String,
    pub counterparty_id: Option<Uuid>,
    pub lines: Vec<JournalLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceCheck {
    pub total_debit: Money,
    pub total_credit: Money,
    /// Debit minus credit.
    pub difference: Money,
    pub is_balanced: bool,
}

pub fn balance_check(lines: &[JournalLine]) -> Result<BalanceCheck, ValidationError> {
    let total_debit =
        checked_sum(lines.iter().map(|l| l.debit)).ok_or(ValidationError::AmountOverflow)?;
    let total_credit =
        checked_sum(lines.iter().map(|l| l.credit)).ok_or(ValidationError::AmountOverflow)?;
    let difference = total_debit
        .checked_sub(total_credit)
        .ok_or(ValidationError::AmountOverflow)?;
    Ok(BalanceCheck {
        total_debit: Money(total_debit),
        total_credit: Money(total_credit),
        difference: Money(difference),
        is_balanced: difference.abs() < BALANCE_TOLERANCE,
    })
}

impl JournalDraft {
    pub fn balance(&self) -> Result<BalanceCheck, ValidationError> {
        balance_check(&self.lines)
    }

    pub fn validate(&self) -> Result<BalanceCheck, ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        if self.lines.len() < 2 {
            return Err(ValidationError::TooFewLines);
        }
        for (i, line) in self.lines.iter().enumerate() {
            let n = i + 1;
            if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
                return Err(ValidationError::NegativeAmount(n));
            }
            let has_debit = line.debit > Decimal::ZERO;
            let has_credit = line.credit > Decimal::ZERO;
            if has_debit == has_credit {
                return Err(ValidationError::OneSidedLine(n));
            }
            if line.debt.is_some() && line.counterparty_id.or(self.counterparty_id).is_none() {
                return Err(ValidationError::DebtWithoutCounterparty(n));
            }
        }
        let check = self.balance()?;
        if !check.is_balanced {
            return Err(ValidationError::Unbalanced {
                debit: check.total_debit.to_string(),
                credit: check.total_credit.to_string(),
            });
        }
        Ok(check)
    }

    /// Parameters for the `insert_journal_with_everything` RPC. `balance` is
    /// the check returned by [`JournalDraft::validate`].
    pub fn to_rpc_params(&self, balance: &BalanceCheck) -> Value {
        let lines: Vec<Value> = self
            .lines
            .iter()
            .map(|line| {
                let debt = line.debt.as_ref().map(|d| {
                    json!({
                        "counterparty_id": line.counterparty_id.or(self.counterparty_id),
                        "direction": d.direction,
                        "category": d.category,
                        "due_date": d.due_date,
                        "interest_rate": d.interest_rate,
                        "original_amount": line.debit.max(line.credit),
                    })
                });
                json!({
                    "account_id": line.account_id,
                    "debit": line.debit,
                    "credit": line.credit,
                    "description": line.description,
                    "cash": line.cash_location_id.map(|id| json!({ "cash_location_id": id })),
                    "debt": debt,
                })
            })
            .collect();

        let cash_location = self.lines.iter().find_map(|l| l.cash_location_id);

        json!({
            "p_base_amount": balance.total_debit,
            "p_company_id": self.company_id,
            "p_created_by": self.created_by,
            "p_description": self.description.trim(),
            "p_entry_date": self.entry_date,
            "p_lines": lines,
            "p_counterparty_id": self.counterparty_id,
            "p_if_cash_location_id": cash_location,
            "p_store_id": self.store_id,
        })
    }
}
