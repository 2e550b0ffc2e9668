// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;

use leaveledger::commands::accrual::{marker_key, run_monthly_accrual_if_needed};
use leaveledger::db;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    for (name, email) in [
        ("Ada", "ada@example.com"),
        ("Ben", "ben@example.com"),
        ("Cleo", "cleo@example.com"),
    ] {
        conn.execute(
            "INSERT INTO people(name, email, annual_allowance, carryover) VALUES (?1, ?2, '20', '0')",
            rusqlite::params![name, email],
        )
        .unwrap();
    }
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn accrues_once_per_person_dated_first_of_month() {
    let mut conn = setup();
    let created = run_monthly_accrual_if_needed(&mut conn, d("2025-03-15")).unwrap();
    assert_eq!(created, 3);

    let entries: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM ledger_entries WHERE kind='accrual' \
             AND effective_date='2025-03-01' AND amount='1.8334'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(entries, 3);

    let markers: i64 = conn
        .query_row("SELECT COUNT(*) FROM accrual_markers", [], |r| r.get(0))
        .unwrap();
    assert_eq!(markers, 1);
    let key: String = conn
        .query_row("SELECT key FROM accrual_markers", [], |r| r.get(0))
        .unwrap();
    assert_eq!(key, "accrual_2025_03");
}

#[test]
fn rerunning_within_the_month_is_a_noop() {
    let mut conn = setup();
    assert_eq!(run_monthly_accrual_if_needed(&mut conn, d("2025-03-15")).unwrap(), 3);
    for _ in 0..5 {
        assert_eq!(
            run_monthly_accrual_if_needed(&mut conn, d("2025-03-28")).unwrap(),
            0
        );
    }
    let entries: i64 = conn
        .query_row("SELECT COUNT(*) FROM ledger_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(entries, 3);
}

#[test]
fn a_new_month_accrues_again() {
    let mut conn = setup();
    assert_eq!(run_monthly_accrual_if_needed(&mut conn, d("2025-03-15")).unwrap(), 3);
    assert_eq!(run_monthly_accrual_if_needed(&mut conn, d("2025-04-01")).unwrap(), 3);

    let entries: i64 = conn
        .query_row("SELECT COUNT(*) FROM ledger_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(entries, 6);
    let markers: i64 = conn
        .query_row("SELECT COUNT(*) FROM accrual_markers", [], |r| r.get(0))
        .unwrap();
    assert_eq!(markers, 2);
}

#[test]
fn existing_marker_wins_without_new_entries() {
    let mut conn = setup();
    // Simulates a concurrent caller having committed the month already.
    conn.execute(
        "INSERT INTO accrual_markers(key, ran_at) VALUES ('accrual_2025_03', '2025-03-01')",
        [],
    )
    .unwrap();
    assert_eq!(run_monthly_accrual_if_needed(&mut conn, d("2025-03-15")).unwrap(), 0);
    let entries: i64 = conn
        .query_row("SELECT COUNT(*) FROM ledger_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(entries, 0);
}

#[test]
fn marker_key_is_zero_padded() {
    assert_eq!(marker_key(d("2025-03-15")), "accrual_2025_03");
    assert_eq!(marker_key(d("2025-11-01")), "accrual_2025_11");
}
