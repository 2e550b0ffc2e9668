// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::errors::LeaveError;
use crate::utils::{
    current_year, id_for_person, load_entries_for_year, maybe_print_json, parse_date,
    parse_decimal, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub
        .get_one::<String>("person")
        .unwrap()
        .trim()
        .to_lowercase();
    // Any signed amount is accepted; negative corrections are a supported case.
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let reason = sub.get_one::<String>("reason").unwrap().trim().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s.trim())?,
        None => chrono::Utc::now().date_naive(),
    };

    if reason.is_empty() {
        return Err(LeaveError::Validation("A reason is required".into()).into());
    }
    let person_id = id_for_person(conn, &email)?;

    conn.execute(
        "INSERT INTO ledger_entries(person_id, kind, amount, reason, effective_date)
         VALUES (?1, 'adjustment', ?2, ?3, ?4)",
        params![person_id, amount.to_string(), reason, date.to_string()],
    )?;
    println!("Adjusted {} by {} days on {}", email, amount, date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let email = sub
        .get_one::<String>("person")
        .unwrap()
        .trim()
        .to_lowercase();
    let year = sub.get_one::<i32>("year").copied().unwrap_or_else(current_year);

    let person_id = id_for_person(conn, &email)?;
    let entries = load_entries_for_year(conn, person_id, year)?;

    if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.effective_date.to_string(),
                    e.kind.as_str().to_string(),
                    e.amount.to_string(),
                    e.reason.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Kind", "Days", "Reason"], rows)
        );
    }
    Ok(())
}
