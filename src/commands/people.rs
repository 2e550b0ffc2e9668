// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::errors::LeaveError;
use crate::utils::{load_people, maybe_print_json, parse_decimal, person_by_email, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let email = sub
        .get_one::<String>("email")
        .unwrap()
        .trim()
        .to_lowercase();
    let role = sub.get_one::<String>("role").unwrap().trim().to_string();
    let allowance = parse_decimal(sub.get_one::<String>("allowance").unwrap().trim())?;
    let carryover = parse_decimal(sub.get_one::<String>("carryover").unwrap().trim())?;

    if name.is_empty() || email.is_empty() {
        return Err(LeaveError::Validation("Name and email are required".into()).into());
    }
    if role != "member" && role != "admin" {
        return Err(
            LeaveError::Validation(format!("Invalid role '{}', expected member|admin", role))
                .into(),
        );
    }
    let exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM people WHERE email=?1",
        params![email],
        |r| r.get(0),
    )?;
    if exists > 0 {
        return Err(
            LeaveError::Validation(format!("A person with email '{}' already exists", email))
                .into(),
        );
    }

    conn.execute(
        "INSERT INTO people(name, email, role, annual_allowance, carryover) VALUES (?1,?2,?3,?4,?5)",
        params![
            name,
            email,
            role,
            allowance.to_string(),
            carryover.to_string()
        ],
    )?;
    println!("Added {} <{}> ({}, {} days)", name, email, role, allowance);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let people = load_people(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &people)? {
        let rows: Vec<Vec<String>> = people
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.email.clone(),
                    p.role.clone(),
                    p.annual_allowance.to_string(),
                    p.carryover.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Email", "Role", "Allowance", "Carryover"], rows)
        );
    }
    Ok(())
}

// Direct edit of the allowance as a mutable property, matching the
// administrative model; corrections through the ledger use `adjust add`.
fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub
        .get_one::<String>("email")
        .unwrap()
        .trim()
        .to_lowercase();
    let person = person_by_email(conn, &email)?;

    if let Some(role) = sub.get_one::<String>("role") {
        let role = role.trim();
        if role != "member" && role != "admin" {
            return Err(LeaveError::Validation(format!(
                "Invalid role '{}', expected member|admin",
                role
            ))
            .into());
        }
        conn.execute(
            "UPDATE people SET role=?1 WHERE id=?2",
            params![role, person.id],
        )?;
    }
    if let Some(allowance) = sub.get_one::<String>("allowance") {
        let allowance = parse_decimal(allowance.trim())?;
        conn.execute(
            "UPDATE people SET annual_allowance=?1 WHERE id=?2",
            params![allowance.to_string(), person.id],
        )?;
    }
    if let Some(carryover) = sub.get_one::<String>("carryover") {
        let carryover = parse_decimal(carryover.trim())?;
        conn.execute(
            "UPDATE people SET carryover=?1 WHERE id=?2",
            params![carryover.to_string(), person.id],
        )?;
    }
    println!("Updated {}", email);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub
        .get_one::<String>("email")
        .unwrap()
        .trim()
        .to_lowercase();
    let acting = sub.get_one::<String>("as").unwrap().trim().to_lowercase();
    let person = person_by_email(conn, &email)?;

    if person.email == acting {
        return Err(LeaveError::Policy("You cannot delete yourself".into()).into());
    }
    if person.role == "admin" {
        let admins: i64 = conn.query_row(
            "SELECT COUNT(*) FROM people WHERE role='admin'",
            [],
            |r| r.get(0),
        )?;
        if admins <= 1 {
            return Err(LeaveError::Policy("Cannot delete the last admin".into()).into());
        }
    }

    // ledger entries and vacations go with the person (ON DELETE CASCADE)
    conn.execute("DELETE FROM people WHERE id=?1", params![person.id])?;
    println!("Removed {} <{}>", person.name, person.email);
    Ok(())
}
