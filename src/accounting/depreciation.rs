//! Straight-line depreciation accrued monthly.
//!
//! The depreciable base is `acquisition_cost - salvage_value`, spread evenly
//! over `useful_life_years * 12` months. Accumulated depreciation is capped at
//! the depreciable base, so book value never drops below salvage.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::money::round2;

/// Longest useful life accepted for new assets. Rows read back from the
/// backend are clamped to it, which also bounds the schedule length.
pub const MAX_USEFUL_LIFE_YEARS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLine {
    pub acquisition_cost: Decimal,
    pub salvage_value: Decimal,
    pub useful_life_years: u32,
    pub acquisition_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepreciationStatus {
    pub depreciable_amount: Decimal,
    pub monthly_depreciation: Decimal,
    pub annual_depreciation: Decimal,
    pub months_elapsed: u32,
    pub accumulated_depreciation: Decimal,
    pub book_value: Decimal,
    pub fully_depreciated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub period: u32,
    pub period_end: NaiveDate,
    pub depreciation: Decimal,
    pub accumulated: Decimal,
    pub book_value: Decimal,
}

impl StraightLine {
    pub fn life_months(&self) -> u32 {
        self.useful_life_years.min(MAX_USEFUL_LIFE_YEARS) * 12
    }

    pub fn depreciable_amount(&self) -> Decimal {
        self.acquisition_cost
            .checked_sub(self.salvage_value.max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    }

    /// Unrounded monthly charge; zero when the asset has no useful life.
    pub fn monthly(&self) -> Decimal {
        match self.life_months() {
            0 => Decimal::ZERO,
            m => self.depreciable_amount() / Decimal::from(m),
        }
    }

    pub fn accumulated(&self, as_of: NaiveDate) -> Decimal {
        let months = months_elapsed(self.acquisition_date, as_of).min(self.life_months());
        let raw = self.monthly() * Decimal::from(months);
        round2(raw).min(self.depreciable_amount())
    }

    pub fn status(&self, as_of: NaiveDate) -> DepreciationStatus {
        let accumulated = self.accumulated(as_of);
        let depreciable = self.depreciable_amount();
        DepreciationStatus {
            depreciable_amount: depreciable,
            monthly_depreciation: round2(self.monthly()),
            annual_depreciation: round2(self.monthly() * Decimal::from(12)),
            months_elapsed: months_elapsed(self.acquisition_date, as_of),
            accumulated_depreciation: accumulated,
            book_value: self.acquisition_cost - accumulated,
            fully_depreciated: self.life_months() > 0 && accumulated >= depreciable,
        }
    }

    /// One row per month of useful life. Each row's charge is the rounded
    /// change in accumulated depreciation, so the last row absorbs rounding
    /// and the charges sum to the depreciable amount.
    pub fn schedule(&self) -> Vec<ScheduleRow> {
        let life = self.life_months();
        let depreciable = self.depreciable_amount();
        let mut rows = Vec::with_capacity(life as usize);
        let mut previous = Decimal::ZERO;
        for period in 1..=life {
            let accumulated = if period == life {
                depreciable
            } else {
                round2(self.monthly() * Decimal::from(period)).min(depreciable)
            };
            let period_end = self
                .acquisition_date
                .checked_add_months(Months::new(period))
                .unwrap_or(NaiveDate::MAX);
            rows.push(ScheduleRow {
                period,
                period_end,
                depreciation: accumulated - previous,
                accumulated,
                book_value: self.acquisition_cost - accumulated,
            });
            previous = accumulated;
        }
        rows
    }
}

/// Whole calendar months between `from` and `to`. A month counts once its
/// anniversary day is reached; `chrono` clamps anniversaries to month end, so
/// an asset bought on Jan 31 completes its first month on Feb 28/29.
pub fn months_elapsed(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }
    let total = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    let mut months = total.max(0) as u32;
    while months > 0 {
        match from.checked_add_months(Months::new(months)) {
            Some(anniversary) if anniversary <= to => break,
            _ => months -= 1,
        }
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn laptop() -> StraightLine {
        StraightLine {
            acquisition_cost: Decimal::new(1200, 0),
            salvage_value: Decimal::new(0, 0),
            useful_life_years: 1,
            acquisition_date: date(2024, 1, 15),
        }
    }

    #[test]
    fn counts_whole_months() {
        assert_eq!(months_elapsed(date(2024, 1, 15), date(2024, 2, 14)), 0);
        assert_eq!(months_elapsed(date(2024, 1, 15), date(2024, 2, 15)), 1);
        assert_eq!(months_elapsed(date(2024, 1, 15), date(2025, 3, 20)), 14);
        assert_eq!(months_elapsed(date(2024, 1, 31), date(2024, 2, 29)), 1);
        assert_eq!(months_elapsed(date(2024, 5, 1), date(2024, 4, 1)), 0);
    }

    #[test]
    fn accrues_linearly() {
        let asset = laptop();
        assert_eq!(asset.monthly(), Decimal::new(100, 0));
        let status = asset.status(date(2024, 4, 20));
        assert_eq!(status.months_elapsed, 3);
        assert_eq!(status.accumulated_depreciation, Decimal::new(300, 0));
        assert_eq!(status.book_value, Decimal::new(900, 0));
        assert_eq!(status.annual_depreciation, Decimal::new(1200, 0));
        assert!(!status.fully_depreciated);
    }

    #[test]
    fn never_exceeds_depreciable_amount() {
        let asset = StraightLine {
            acquisition_cost: Decimal::new(10_000, 0),
            salvage_value: Decimal::new(1_000, 0),
            useful_life_years: 3,
            acquisition_date: date(2020, 6, 1),
        };
        for as_of in [date(2023, 6, 1), date(2030, 1, 1)] {
            let status = asset.status(as_of);
            assert_eq!(status.accumulated_depreciation, Decimal::new(9_000, 0));
            assert_eq!(status.book_value, Decimal::new(1_000, 0));
            assert!(status.fully_depreciated);
        }
    }

    #[test]
    fn salvage_above_cost_means_nothing_to_depreciate() {
        let asset = StraightLine {
            salvage_value: Decimal::new(2_000, 0),
            ..laptop()
        };
        assert_eq!(asset.depreciable_amount(), Decimal::ZERO);
        assert_eq!(asset.accumulated(date(2030, 1, 1)), Decimal::ZERO);
    }

    #[test]
    fn zero_life_is_not_depreciated() {
        let asset = StraightLine {
            useful_life_years: 0,
            ..laptop()
        };
        let status = asset.status(date(2030, 1, 1));
        assert_eq!(status.monthly_depreciation, Decimal::ZERO);
        assert_eq!(status.accumulated_depreciation, Decimal::ZERO);
        assert!(!status.fully_depreciated);
        assert!(asset.schedule().is_empty());
    }

    #[test]
    fn schedule_absorbs_rounding_in_last_row() {
        let asset = StraightLine {
            acquisition_cost: Decimal::new(1_000, 0),
            salvage_value: Decimal::ZERO,
            useful_life_years: 3,
            acquisition_date: date(2024, 1, 1),
        };
        let rows = asset.schedule();
        assert_eq!(rows.len(), 36);
        let total: Decimal = rows.iter().map(|r| r.depreciation).sum();
        assert_eq!(total, Decimal::new(1_000, 0));
        assert_eq!(rows[0].period_end, date(2024, 2, 1));
        assert_eq!(rows[35].book_value, Decimal::ZERO);
        assert!(rows.iter().all(|r| r.depreciation >= Decimal::ZERO));
    }

    #[test]
    fn oversized_life_is_clamped() {
        let asset = StraightLine {
            useful_life_years: u32::MAX,
            ..laptop()
        };
        assert_eq!(asset.life_months(), MAX_USEFUL_LIFE_YEARS * 12);
        let rows = asset.schedule();
        assert_eq!(rows.len(), 1_200);
        assert_eq!(rows[1_199].accumulated, Decimal::new(1200, 0));
    }

    #[test]
    fn extreme_amounts_do_not_overflow() {
        let asset = StraightLine {
            acquisition_cost: Decimal::MIN,
            salvage_value: Decimal::MAX,
            ..laptop()
        };
        assert_eq!(asset.depreciable_amount(), Decimal::ZERO);
        assert_eq!(asset.accumulated(date(2030, 1, 1)), Decimal::ZERO);
    }
}
