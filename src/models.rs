// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::LeaveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String, // member / admin
    pub annual_allowance: Decimal,
    pub carryover: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Adjustment,
    Accrual,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Adjustment => "adjustment",
            EntryKind::Accrual => "accrual",
        }
    }
}

/// Append-only dated, signed day-amount record attributed to one person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub person_id: i64,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub reason: String,
    pub effective_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VacationStatus {
    Pending,
    Approved,
    Denied,
}

impl VacationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VacationStatus::Pending => "pending",
            VacationStatus::Approved => "approved",
            VacationStatus::Denied => "denied",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LeaveError> {
        match s {
            "pending" => Ok(VacationStatus::Pending),
            "approved" => Ok(VacationStatus::Approved),
            "denied" => Ok(VacationStatus::Denied),
            other => Err(LeaveError::Validation(format!(
                "Invalid status '{}', expected pending|approved|denied",
                other
            ))),
        }
    }
}

/// `days` is fixed at creation from the normalized start/end pair and never
/// recomputed; rows only ever change status after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationRequest {
    pub id: i64,
    pub person_id: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
    pub note: Option<String>,
    pub status: VacationStatus,
}
