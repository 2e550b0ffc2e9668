// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};

use crate::ledger::MONTHLY_RATE;
use crate::utils::parse_date;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("run", sub)) => {
            let as_of = match sub.get_one::<String>("as-of") {
                Some(s) => parse_date(s.trim())?,
                None => chrono::Utc::now().date_naive(),
            };
            let created = run_monthly_accrual_if_needed(conn, as_of)?;
            if created == 0 {
                println!("Accrual already done for {}", as_of.format("%Y-%m"));
            } else {
                println!(
                    "Accrued {} days for {} people ({})",
                    *MONTHLY_RATE,
                    created,
                    as_of.format("%Y-%m")
                );
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn marker_key(as_of: NaiveDate) -> String {
    format!("accrual_{}_{:02}", as_of.year(), as_of.month())
}

/// Run the monthly accrual once per calendar month: one ledger entry per
/// person, dated the first of the month, plus the month marker, committed
/// in a single transaction. Every call after the first in a month is a
/// no-op, including the caller that loses the marker-insert race.
///
/// Returns the number of entries created (0 or the number of people).
pub fn run_monthly_accrual_if_needed(conn: &mut Connection, as_of: NaiveDate) -> Result<usize> {
    let key = marker_key(as_of);
    let existing: Option<String> = conn
        .query_row(
            "SELECT key FROM accrual_markers WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(0);
    }

    let first = NaiveDate::from_ymd_opt(as_of.year(), as_of.month(), 1)
        .with_context(|| format!("Invalid accrual month {}", as_of.format("%Y-%m")))?;
    let reason = format!("Monthly accrual {}", as_of.format("%Y-%m"));

    let tx = conn.transaction()?;
    let mut created = 0usize;
    {
        let mut stmt = tx.prepare("SELECT id FROM people ORDER BY id")?;
        let ids = stmt.query_map([], |r| r.get::<_, i64>(0))?;
        let mut insert = tx.prepare(
            "INSERT INTO ledger_entries(person_id, kind, amount, reason, effective_date)
             VALUES (?1, 'accrual', ?2, ?3, ?4)",
        )?;
        for id in ids {
            let id = id?;
            insert.execute(params![
                id,
                MONTHLY_RATE.to_string(),
                reason,
                first.to_string()
            ])?;
            created += 1;
        }
    }
    match tx.execute(
        "INSERT INTO accrual_markers(key, ran_at) VALUES (?1, ?2)",
        params![key, as_of.to_string()],
    ) {
        Ok(_) => {
            tx.commit()?;
            Ok(created)
        }
        // Another writer committed the marker first: the month is already
        // accrued, so drop our entries and report nothing to do.
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            tx.rollback()?;
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}
