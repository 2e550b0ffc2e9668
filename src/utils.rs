// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::errors::LeaveError;
use crate::models::{EntryKind, Person, VacationRequest, VacationStatus};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Inclusive calendar days between two dates; swap-invariant.
pub fn days_between_calendar(start: NaiveDate, end: NaiveDate) -> i64 {
    let (start, end) = if end < start { (end, start) } else { (start, end) };
    (end - start).num_days() + 1
}

/// First and last day of a calendar month.
pub fn month_span(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{:02}", year, month))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{:02}", year, month))?;
    Ok((first, next.pred_opt().unwrap_or(first)))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_person(conn: &Connection, email: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM people WHERE email=?1")?;
    let id: Option<i64> = stmt.query_row(params![email], |r| r.get(0)).optional()?;
    id.ok_or_else(|| LeaveError::NotFound(format!("Person '{}'", email)).into())
}

pub fn person_by_id(conn: &Connection, id: i64) -> Result<Person> {
    let row: Option<Person> = conn
        .query_row(
            "SELECT id, name, email, role, annual_allowance, carryover FROM people WHERE id=?1",
            params![id],
            person_from_row,
        )
        .optional()?;
    row.ok_or_else(|| LeaveError::NotFound(format!("Person #{}", id)).into())
}

pub fn person_by_email(conn: &Connection, email: &str) -> Result<Person> {
    let row: Option<Person> = conn
        .query_row(
            "SELECT id, name, email, role, annual_allowance, carryover FROM people WHERE email=?1",
            params![email],
            person_from_row,
        )
        .optional()?;
    row.ok_or_else(|| LeaveError::NotFound(format!("Person '{}'", email)).into())
}

fn person_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        role: r.get(3)?,
        annual_allowance: decimal_column(r, 4)?,
        carryover: decimal_column(r, 5)?,
    })
}

fn decimal_column(r: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub fn load_people(conn: &Connection) -> Result<Vec<Person>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, role, annual_allowance, carryover FROM people ORDER BY name",
    )?;
    let rows = stmt.query_map([], person_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn load_entries_for_year(
    conn: &Connection,
    person_id: i64,
    year: i32,
) -> Result<Vec<crate::models::LedgerEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, person_id, kind, amount, reason, effective_date
         FROM ledger_entries WHERE person_id=?1 AND substr(effective_date,1,4)=?2
         ORDER BY effective_date, id",
    )?;
    let mut rows = stmt.query(params![person_id, format!("{:04}", year)])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind_s: String = r.get(2)?;
        let kind = match kind_s.as_str() {
            "accrual" => EntryKind::Accrual,
            _ => EntryKind::Adjustment,
        };
        let amount_s: String = r.get(3)?;
        let date_s: String = r.get(5)?;
        out.push(crate::models::LedgerEntry {
            id: r.get(0)?,
            person_id: r.get(1)?,
            kind,
            amount: amount_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in ledger_entries", amount_s))?,
            reason: r.get(4)?,
            effective_date: parse_date(&date_s)?,
        });
    }
    Ok(out)
}

pub fn load_requests_for_person(
    conn: &Connection,
    person_id: i64,
) -> Result<Vec<VacationRequest>> {
    let mut stmt = conn.prepare(
        "SELECT id, person_id, start, end, days, note, status
         FROM vacations WHERE person_id=?1 ORDER BY start DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![person_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(request_from_row(r)?);
    }
    Ok(out)
}

fn request_from_row(r: &rusqlite::Row<'_>) -> Result<VacationRequest> {
    let start_s: String = r.get(2)?;
    let end_s: String = r.get(3)?;
    let status_s: String = r.get(6)?;
    Ok(VacationRequest {
        id: r.get(0)?,
        person_id: r.get(1)?,
        start: parse_date(&start_s)?,
        end: parse_date(&end_s)?,
        days: r.get(4)?,
        note: r.get(5)?,
        status: VacationStatus::parse(&status_s)?,
    })
}

/// Current year from the wall clock; commands use it when --year is omitted.
pub fn current_year() -> i32 {
    chrono::Utc::now().date_naive().year()
}
