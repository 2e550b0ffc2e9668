// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection};
use serde_json::json;

use crate::utils::current_year;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("requests", sub)) => export_requests(conn, sub),
        _ => Ok(()),
    }
}

fn export_requests(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let year = sub.get_one::<i32>("year").copied().unwrap_or_else(current_year);

    // Requests belong to the year they start in, sorted by start ascending.
    let mut stmt = conn.prepare(
        "SELECT p.name, p.email, v.start, v.end, v.days, v.status
         FROM vacations v JOIN people p ON v.person_id=p.id
         WHERE substr(v.start,1,4)=?1
         ORDER BY v.start, v.id",
    )?;
    let rows = stmt.query_map(params![format!("{:04}", year)], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, i64>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["name", "email", "start", "end", "days", "status"])?;
            for row in rows {
                let (name, email, start, end, days, status) = row?;
                wtr.write_record([name, email, start, end, days.to_string(), status])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (name, email, start, end, days, status) = row?;
                items.push(json!({
                    "name": name, "email": email, "start": start, "end": end,
                    "days": days, "status": status
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            return Err(anyhow::anyhow!("Unknown format: {} (use csv|json)", fmt));
        }
    }
    println!("Exported {} requests to {}", year, out);
    Ok(())
}
