// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use leaveledger::commands::{balance, people, requests};
use leaveledger::{cli, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO people(name, email, role, annual_allowance, carryover) \
         VALUES ('Ada', 'ada@example.com', 'admin', '20', '0')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO people(name, email, annual_allowance, carryover) \
         VALUES ('Ben', 'ben@example.com', '20', '0')",
        [],
    )
    .unwrap();
    conn
}

fn run(conn: &Connection, argv: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("request", m)) => requests::handle(conn, m),
        Some(("person", m)) => people::handle(conn, m),
        _ => panic!("unexpected command in {:?}", argv),
    }
}

#[test]
fn reversed_dates_are_swapped_and_day_count_stored() {
    let conn = setup();
    run(
        &conn,
        &[
            "leaveledger", "request", "add",
            "--person", "ben@example.com",
            "--start", "2025-06-06",
            "--end", "2025-06-02",
        ],
    )
    .unwrap();

    let (start, end, days, status): (String, String, i64, String) = conn
        .query_row("SELECT start, end, days, status FROM vacations", [], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
        })
        .unwrap();
    assert_eq!(start, "2025-06-02");
    assert_eq!(end, "2025-06-06");
    assert_eq!(days, 5);
    assert_eq!(status, "pending");
}

#[test]
fn approve_then_deny_transitions_status() {
    let conn = setup();
    run(
        &conn,
        &[
            "leaveledger", "request", "add",
            "--person", "ben@example.com",
            "--start", "2025-06-02",
            "--end", "2025-06-06",
        ],
    )
    .unwrap();

    run(&conn, &["leaveledger", "request", "approve", "--id", "1"]).unwrap();
    let status: String = conn
        .query_row("SELECT status FROM vacations WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(status, "approved");

    run(&conn, &["leaveledger", "request", "deny", "--id", "1"]).unwrap();
    let status: String = conn
        .query_row("SELECT status FROM vacations WHERE id=1", [], |r| r.get(0))
        .unwrap();
    assert_eq!(status, "denied");
}

#[test]
fn actions_on_missing_requests_fail_without_side_effects() {
    let conn = setup();
    assert!(run(&conn, &["leaveledger", "request", "approve", "--id", "99"]).is_err());
    assert!(run(&conn, &["leaveledger", "request", "rm", "--id", "99"]).is_err());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM vacations", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn approved_request_reduces_remaining_balance() {
    let conn = setup();
    run(
        &conn,
        &[
            "leaveledger", "request", "add",
            "--person", "ben@example.com",
            "--start", "2025-06-02",
            "--end", "2025-06-06",
        ],
    )
    .unwrap();
    run(&conn, &["leaveledger", "request", "approve", "--id", "1"]).unwrap();

    let ben_id: i64 = conn
        .query_row("SELECT id FROM people WHERE email='ben@example.com'", [], |r| r.get(0))
        .unwrap();
    let b = balance::balance_for(&conn, ben_id, 2025).unwrap();
    assert_eq!(b.taken_days, 5);
    assert_eq!(b.remaining.to_string(), "15");
}

#[test]
fn cannot_delete_the_last_admin() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "leaveledger", "person", "rm",
            "--email", "ada@example.com",
            "--as", "ben@example.com",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("last admin"));
}

#[test]
fn cannot_delete_yourself() {
    let conn = setup();
    conn.execute(
        "UPDATE people SET role='admin' WHERE email='ben@example.com'",
        [],
    )
    .unwrap();
    let err = run(
        &conn,
        &[
            "leaveledger", "person", "rm",
            "--email", "ada@example.com",
            "--as", "ada@example.com",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("yourself"));
}

#[test]
fn deleting_a_person_cascades_to_their_history() {
    let conn = setup();
    run(
        &conn,
        &[
            "leaveledger", "request", "add",
            "--person", "ben@example.com",
            "--start", "2025-06-02",
            "--end", "2025-06-06",
        ],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO ledger_entries(person_id, kind, amount, reason, effective_date) \
         SELECT id, 'adjustment', '-1', 'correction', '2025-05-01' FROM people \
         WHERE email='ben@example.com'",
        [],
    )
    .unwrap();

    run(
        &conn,
        &[
            "leaveledger", "person", "rm",
            "--email", "ben@example.com",
            "--as", "ada@example.com",
        ],
    )
    .unwrap();

    let vacations: i64 = conn
        .query_row("SELECT COUNT(*) FROM vacations", [], |r| r.get(0))
        .unwrap();
    let entries: i64 = conn
        .query_row("SELECT COUNT(*) FROM ledger_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(vacations, 0);
    assert_eq!(entries, 0);
}

#[test]
fn duplicate_email_is_rejected() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "leaveledger", "person", "add",
            "--name", "Other Ada",
            "--email", "ada@example.com",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("already exists"));
}
