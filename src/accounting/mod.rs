//! Bookkeeping arithmetic performed locally before (or after) talking to the
//! remote backend. Everything here is pure and synchronous.

pub mod cash;
pub mod debt;
pub mod depreciation;
pub mod journal;
pub mod money;
pub mod statements;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("journal entry needs at least two lines")]
    TooFewLines,
    #[error("line {0}: exactly one of debit or credit must be positive")]
    OneSidedLine(usize),
    #[error("line {0}: amounts cannot be negative")]
    NegativeAmount(usize),
    #[error("journal entry is not balanced: debit {debit}, credit {credit}")]
    Unbalanced { debit: String, credit: String },
    #[error("description is required")]
    MissingDescription,
    #[error("line {0}: debt lines need a counterparty")]
    DebtWithoutCounterparty(usize),
    #[error("denomination {0} appears more than once")]
    DuplicateDenomination(String),
    #[error("denomination {0}: quantity cannot be negative")]
    NegativeQuantity(String),
    #[error("denomination {0}: value must be positive")]
    NonPositiveValue(String),
    #[error("cash count has no denominations")]
    EmptyCount,
    #[error("amounts are too large to total")]
    AmountOverflow,
    #[error("{0}")]
    Invalid(String),
}
