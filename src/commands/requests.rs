// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::errors::LeaveError;
use crate::models::VacationStatus;
use crate::utils::{
    days_between_calendar, id_for_person, maybe_print_json, parse_date, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("approve", sub)) => set_status(conn, sub, VacationStatus::Approved)?,
        Some(("deny", sub)) => set_status(conn, sub, VacationStatus::Denied)?,
        Some(("rm", sub)) => rm(conn, sub)?,
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
    let start = parse_date(sub.get_one::<String>("start").unwrap().trim())?;
    let end = parse_date(sub.get_one::<String>("end").unwrap().trim())?;
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    let person_id = id_for_person(conn, &email)?;

    // Reversed inputs are swapped rather than rejected; the stored day
    // count is fixed here and never recomputed.
    let (start, end) = if end < start { (end, start) } else { (start, end) };
    let days = days_between_calendar(start, end);

    conn.execute(
        "INSERT INTO vacations(person_id, start, end, days, note, status)
         VALUES (?1, ?2, ?3, ?4, ?5, 'pending')",
        params![person_id, start.to_string(), end.to_string(), days, note],
    )?;
    println!(
        "Requested {} -> {} ({} days) for {}",
        start, end, days, email
    );
    Ok(())
}

#[derive(Serialize)]
pub struct RequestRow {
    pub id: i64,
    pub person: String,
    pub email: String,
    pub start: String,
    pub end: String,
    pub days: i64,
    pub status: String,
    pub note: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<RequestRow>> {
    let mut sql = String::from(
        "SELECT v.id, p.name, p.email, v.start, v.end, v.days, v.status, v.note
         FROM vacations v JOIN people p ON v.person_id=p.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(email) = sub.get_one::<String>("person") {
        sql.push_str(" AND p.email=?");
        params_vec.push(email.trim().to_lowercase());
    }
    if let Some(year) = sub.get_one::<i32>("year") {
        sql.push_str(" AND substr(v.start,1,4)=?");
        params_vec.push(format!("{:04}", year));
    }
    if let Some(status) = sub.get_one::<String>("status") {
        let status = VacationStatus::parse(status.trim())?;
        sql.push_str(" AND v.status=?");
        params_vec.push(status.as_str().to_string());
    }
    sql.push_str(" ORDER BY v.start DESC, v.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let note: Option<String> = r.get(7)?;
        data.push(RequestRow {
            id: r.get(0)?,
            person: r.get(1)?,
            email: r.get(2)?,
            start: r.get(3)?,
            end: r.get(4)?,
            days: r.get(5)?,
            status: r.get(6)?,
            note: note.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.person.clone(),
                    format!("{} -> {}", r.start, r.end),
                    r.days.to_string(),
                    r.status.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Person", "Dates", "Days", "Status", "Note"], rows)
        );
    }
    Ok(())
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches, status: VacationStatus) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute(
        "UPDATE vacations SET status=?1 WHERE id=?2",
        params![status.as_str(), id],
    )?;
    if changed == 0 {
        return Err(LeaveError::NotFound(format!("Request #{}", id)).into());
    }
    let start: String = conn.query_row(
        "SELECT start FROM vacations WHERE id=?1",
        params![id],
        |r| r.get(0),
    )?;
    let year = parse_date(&start)?.year();
    println!("Request #{} {} (counts toward {})", id, status.as_str(), year);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute("DELETE FROM vacations WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(LeaveError::NotFound(format!("Request #{}", id)).into());
    }
    println!("Request #{} deleted", id);
    Ok(())
}
