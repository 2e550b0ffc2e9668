// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{LedgerEntry, Person, VacationRequest, VacationStatus};

/// Days granted per person per calendar month by the automatic accrual.
pub static MONTHLY_RATE: Lazy<Decimal> = Lazy::new(|| Decimal::new(18334, 4));

/// Point-in-time balance for one person and one year.
#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    pub allowance_total: Decimal,
    pub adjustments: Decimal,
    pub taken_days: i64,
    pub pending_days: i64,
    pub remaining: Decimal,
}

/// Fold the ledger state for one person into a year balance.
///
/// `allowance_total` is annual allowance plus carryover and is deliberately
/// not year-scoped, while adjustments and taken days are; allowance resets
/// are expressed through carryover and correction entries instead. Requests
/// spanning a year boundary count entirely toward their start year, and
/// pending days are informational only (not subtracted from remaining).
pub fn compute_balance(
    person: &Person,
    entries: &[LedgerEntry],
    requests: &[VacationRequest],
    year: i32,
) -> Balance {
    let allowance_total = person.annual_allowance + person.carryover;
    let adjustments: Decimal = entries
        .iter()
        .filter(|e| e.effective_date.year() == year)
        .map(|e| e.amount)
        .sum();
    let taken_days: i64 = requests
        .iter()
        .filter(|v| v.status == VacationStatus::Approved && v.start.year() == year)
        .map(|v| v.days)
        .sum();
    let pending_days: i64 = requests
        .iter()
        .filter(|v| v.status == VacationStatus::Pending && v.start.year() == year)
        .map(|v| v.days)
        .sum();
    let remaining = allowance_total + adjustments - Decimal::from(taken_days);
    Balance {
        allowance_total,
        adjustments,
        taken_days,
        pending_days,
        remaining,
    }
}

/// A vacation interval joined with the display name of its owner.
#[derive(Debug, Clone)]
pub struct LabeledSpan {
    pub person: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: VacationStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DayLoad {
    pub approved: u32,
    pub pending: u32,
    pub people: Vec<String>,
}

/// Per-day head counts over a window, intervals clipped to it, both ends
/// inclusive. Denied requests contribute nothing; pending people are labeled.
pub fn aggregate_window(
    spans: &[LabeledSpan],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> BTreeMap<NaiveDate, DayLoad> {
    let mut by_day: BTreeMap<NaiveDate, DayLoad> = BTreeMap::new();
    for span in spans {
        if span.status == VacationStatus::Denied {
            continue;
        }
        if span.end < window_start || span.start > window_end {
            continue;
        }
        let clipped_start = span.start.max(window_start);
        let clipped_end = span.end.min(window_end);
        for d in clipped_start.iter_days().take_while(|d| *d <= clipped_end) {
            let load = by_day.entry(d).or_default();
            match span.status {
                VacationStatus::Approved => {
                    load.approved += 1;
                    load.people.push(span.person.clone());
                }
                VacationStatus::Pending => {
                    load.pending += 1;
                    load.people.push(format!("{} (pending)", span.person));
                }
                VacationStatus::Denied => {}
            }
        }
    }
    by_day
}

#[derive(Debug, Clone, Serialize)]
pub struct YearlyReport {
    /// Approved vacation days per month, index 0 = January.
    pub days_per_month: [u32; 12],
    pub days_per_person: BTreeMap<String, u32>,
}

/// Approved vacation days for one year: per month and per person. Spans are
/// clipped to the year and each day is counted only if it falls in it.
pub fn aggregate_yearly(spans: &[LabeledSpan], year: i32) -> YearlyReport {
    let mut report = YearlyReport {
        days_per_month: [0; 12],
        days_per_person: BTreeMap::new(),
    };
    let (Some(year_start), Some(year_end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) else {
        return report;
    };
    for span in spans {
        if span.status != VacationStatus::Approved {
            continue;
        }
        if span.end < year_start || span.start > year_end {
            continue;
        }
        let clipped_start = span.start.max(year_start);
        let clipped_end = span.end.min(year_end);
        for d in clipped_start.iter_days().take_while(|d| *d <= clipped_end) {
            if d.year() != year {
                continue;
            }
            report.days_per_month[(d.month() - 1) as usize] += 1;
            *report.days_per_person.entry(span.person.clone()).or_insert(0) += 1;
        }
    }
    report
}
