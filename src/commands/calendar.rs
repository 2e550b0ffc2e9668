// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::commands::accrual::run_monthly_accrual_if_needed;
use crate::ledger::{aggregate_window, LabeledSpan};
use crate::models::VacationStatus;
use crate::utils::{current_year, maybe_print_json, month_span, parse_date, pretty_table};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let today = chrono::Utc::now().date_naive();
    let year = m.get_one::<i32>("year").copied().unwrap_or_else(current_year);
    let month = m.get_one::<u32>("month").copied().unwrap_or(today.month());

    run_monthly_accrual_if_needed(conn, today)?;

    let (first, last) = month_span(year, month)?;
    let spans = load_spans(conn, first, last)?;
    let by_day = aggregate_window(&spans, first, last);

    #[derive(Serialize)]
    struct DayRow {
        date: String,
        weekday: String,
        approved: u32,
        pending: u32,
        people: Vec<String>,
    }

    let mut data = Vec::new();
    for d in first.iter_days().take_while(|d| *d <= last) {
        let load = by_day.get(&d).cloned().unwrap_or_default();
        data.push(DayRow {
            date: d.to_string(),
            weekday: d.format("%a").to_string(),
            approved: load.approved,
            pending: load.pending,
            people: load.people,
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.weekday.clone(),
                    r.approved.to_string(),
                    r.pending.to_string(),
                    if r.people.is_empty() {
                        "-".into()
                    } else {
                        r.people.join(", ")
                    },
                ]
            })
            .collect();
        println!("{:02}/{}", month, year);
        println!(
            "{}",
            pretty_table(&["Date", "Day", "Away", "Pending", "Who"], rows)
        );
    }
    Ok(())
}

/// Approved and pending requests intersecting [first, last], with names.
pub fn load_spans(
    conn: &Connection,
    first: chrono::NaiveDate,
    last: chrono::NaiveDate,
) -> Result<Vec<LabeledSpan>> {
    let mut stmt = conn.prepare(
        "SELECT p.name, v.start, v.end, v.status
         FROM vacations v JOIN people p ON v.person_id=p.id
         WHERE v.status IN ('approved','pending') AND v.start<=?1 AND v.end>=?2",
    )?;
    let mut rows = stmt.query(params![last.to_string(), first.to_string()])?;
    let mut spans = Vec::new();
    while let Some(r) = rows.next()? {
        let start_s: String = r.get(1)?;
        let end_s: String = r.get(2)?;
        let status_s: String = r.get(3)?;
        spans.push(LabeledSpan {
            person: r.get(0)?,
            start: parse_date(&start_s)?,
            end: parse_date(&end_s)?,
            status: VacationStatus::parse(&status_s)?,
        });
    }
    Ok(spans)
}
