// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::accrual::run_monthly_accrual_if_needed;
use crate::ledger::{compute_balance, Balance};
use crate::utils::{
    current_year, load_entries_for_year, load_people, load_requests_for_person, maybe_print_json,
    person_by_email, pretty_table,
};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("team", sub)) => team(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Load one person's ledger state and fold it into a year balance.
pub fn balance_for(conn: &Connection, person_id: i64, year: i32) -> Result<Balance> {
    let person = crate::utils::person_by_id(conn, person_id)?;
    let entries = load_entries_for_year(conn, person_id, year)?;
    let requests = load_requests_for_person(conn, person_id)?;
    Ok(compute_balance(&person, &entries, &requests, year))
}

fn show(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let email = sub
        .get_one::<String>("person")
        .unwrap()
        .trim()
        .to_lowercase();
    let year = sub.get_one::<i32>("year").copied().unwrap_or_else(current_year);

    // Balances must reflect the current month's accrual once the month
    // has begun, so the check runs before every read.
    run_monthly_accrual_if_needed(conn, chrono::Utc::now().date_naive())?;

    let person = person_by_email(conn, &email)?;
    let b = balance_for(conn, person.id, year)?;

    if !maybe_print_json(json_flag, jsonl_flag, &b)? {
        let rows = vec![
            vec!["Allowance + carryover".into(), b.allowance_total.to_string()],
            vec!["Adjustments (±)".into(), b.adjustments.to_string()],
            vec!["Taken (approved)".into(), b.taken_days.to_string()],
            vec!["Pending".into(), b.pending_days.to_string()],
            vec!["Remaining".into(), b.remaining.to_string()],
        ];
        println!("{} — {}", person.name, year);
        println!("{}", pretty_table(&["", "Days"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct TeamRow {
    name: String,
    email: String,
    allowance: String,
    adjustments: String,
    taken: i64,
    pending: i64,
    remaining: String,
}

fn team(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = sub.get_one::<i32>("year").copied().unwrap_or_else(current_year);

    run_monthly_accrual_if_needed(conn, chrono::Utc::now().date_naive())?;

    let mut data = Vec::new();
    for p in load_people(conn)? {
        let b = balance_for(conn, p.id, year)?;
        data.push(TeamRow {
            name: p.name,
            email: p.email,
            allowance: b.allowance_total.to_string(),
            adjustments: b.adjustments.to_string(),
            taken: b.taken_days,
            pending: b.pending_days,
            remaining: b.remaining.to_string(),
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.email.clone(),
                    r.allowance.clone(),
                    r.adjustments.clone(),
                    r.taken.to_string(),
                    r.pending.to_string(),
                    r.remaining.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Email", "Allowance", "±", "Taken", "Pending", "Remaining"],
                rows,
            )
        );
    }
    Ok(())
}
