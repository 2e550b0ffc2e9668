// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::commands::accrual::run_monthly_accrual_if_needed;
use crate::ledger::{aggregate_yearly, LabeledSpan};
use crate::models::VacationStatus;
use crate::utils::{current_year, maybe_print_json, parse_date, pretty_table};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("yearly", sub)) => yearly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn yearly(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = sub.get_one::<i32>("year").copied().unwrap_or_else(current_year);

    run_monthly_accrual_if_needed(conn, chrono::Utc::now().date_naive())?;

    let spans = load_approved_spans(conn, year)?;
    let report = aggregate_yearly(&spans, year);

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let month_rows: Vec<Vec<String>> = report
            .days_per_month
            .iter()
            .enumerate()
            .map(|(i, days)| vec![format!("{:02}", i + 1), days.to_string()])
            .collect();
        println!("Vacation days per month, {}", year);
        println!("{}", pretty_table(&["Month", "Days"], month_rows));

        let person_rows: Vec<Vec<String>> = report
            .days_per_person
            .iter()
            .map(|(name, days)| vec![name.clone(), days.to_string()])
            .collect();
        println!("Vacation days per person, {}", year);
        println!("{}", pretty_table(&["Person", "Days"], person_rows));
    }
    Ok(())
}

/// Approved requests intersecting the year, with names.
pub fn load_approved_spans(conn: &Connection, year: i32) -> Result<Vec<LabeledSpan>> {
    let mut stmt = conn.prepare(
        "SELECT p.name, v.start, v.end
         FROM vacations v JOIN people p ON v.person_id=p.id
         WHERE v.status='approved' AND v.start<=?1 AND v.end>=?2",
    )?;
    let last = format!("{:04}-12-31", year);
    let first = format!("{:04}-01-01", year);
    let mut rows = stmt.query(params![last, first])?;
    let mut spans = Vec::new();
    while let Some(r) = rows.next()? {
        let start_s: String = r.get(1)?;
        let end_s: String = r.get(2)?;
        spans.push(LabeledSpan {
            person: r.get(0)?,
            start: parse_date(&start_s)?,
            end: parse_date(&end_s)?,
            status: VacationStatus::Approved,
        });
    }
    Ok(spans)
}
