use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtDirection {
    Receivable,
    Payable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    Current,
    Days1To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    pub fn for_days_overdue(days: i64) -> Self {
        match days {
            i64::MIN..=0 => AgingBucket::Current,
            1..=30 => AgingBucket::Days1To30,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }
}

/// The fields aging needs from an open debt.
#[derive(Debug, Clone, Copy)]
pub struct OpenDebt {
    pub direction: DebtDirection,
    pub remaining_amount: Decimal,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgingBuckets {
    pub current: Decimal,
    pub days_1_30: Decimal,
    pub days_31_60: Decimal,
    pub days_61_90: Decimal,
    pub over_90: Decimal,
    pub overdue: Decimal,
    pub total: Decimal,
    pub count: usize,
}

impl AgingBuckets {
    fn add(&mut self, bucket: AgingBucket, amount: Decimal) {
        match bucket {
            AgingBucket::Current => self.current += amount,
            AgingBucket::Days1To30 => self.days_1_30 += amount,
            AgingBucket::Days31To60 => self.days_31_60 += amount,
            AgingBucket::Days61To90 => self.days_61_90 += amount,
            AgingBucket::Over90 => self.over_90 += amount,
        }
        if bucket != AgingBucket::Current {
            self.overdue += amount;
        }
        self.total += amount;
        self.count += 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgingReport {
    pub as_of: Option<NaiveDate>,
    pub receivable: AgingBuckets,
    pub payable: AgingBuckets,
    pub net_position: Decimal,
}

/// Debts with nothing left to settle are skipped. A debt without a due date
/// is never overdue.
pub fn aging_report<I>(debts: I, as_of: NaiveDate) -> AgingReport
where
    I: IntoIterator<Item = OpenDebt>,
{
    let mut report = AgingReport {
        as_of: Some(as_of),
        ..Default::default()
    };
    for debt in debts {
        if debt.remaining_amount <= Decimal::ZERO {
            continue;
        }
        let bucket = debt
            .due_date
            .map(|due| AgingBucket::for_days_overdue((as_of - due).num_days()))
            .unwrap_or(AgingBucket::Current);
        match debt.direction {
            DebtDirection::Receivable => report.receivable.add(bucket, debt.remaining_amount),
            DebtDirection::Payable => report.payable.add(bucket, debt.remaining_amount),
        }
    }
    report.net_position = report.receivable.total - report.payable.total;
    report
}
