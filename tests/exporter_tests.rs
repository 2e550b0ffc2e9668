// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

use leaveledger::commands::exporter;
use leaveledger::{cli, db};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO people(name, email, annual_allowance, carryover) \
         VALUES ('Ada', 'ada@example.com', '20', '0')",
        [],
    )
    .unwrap();
    // Out of date order on purpose; export must sort by start ascending
    conn.execute(
        "INSERT INTO vacations(person_id, start, end, days, status) \
         VALUES (1, '2025-08-11', '2025-08-13', 3, 'pending')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO vacations(person_id, start, end, days, status) \
         VALUES (1, '2025-06-02', '2025-06-06', 5, 'approved')",
        [],
    )
    .unwrap();
    // Different year, must be filtered out
    conn.execute(
        "INSERT INTO vacations(person_id, start, end, days, status) \
         VALUES (1, '2024-06-02', '2024-06-06', 5, 'approved')",
        [],
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, fmt: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "leaveledger",
        "export",
        "requests",
        "--year",
        "2025",
        "--format",
        fmt,
        "--out",
        out,
    ]);
    if let Some(("export", m)) = matches.subcommand() {
        exporter::handle(conn, m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_requests_csv_sorted_by_start() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("requests.csv");
    run_export(&conn, "csv", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "name,email,start,end,days,status");
    assert_eq!(
        lines[1],
        "Ada,ada@example.com,2025-06-02,2025-06-06,5,approved"
    );
    assert_eq!(
        lines[2],
        "Ada,ada@example.com,2025-08-11,2025-08-13,3,pending"
    );
    assert_eq!(lines.len(), 3);
}

#[test]
fn export_requests_json() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("requests.json");
    run_export(&conn, "json", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "name": "Ada", "email": "ada@example.com",
                "start": "2025-06-02", "end": "2025-06-06",
                "days": 5, "status": "approved"
            },
            {
                "name": "Ada", "email": "ada@example.com",
                "start": "2025-08-11", "end": "2025-08-13",
                "days": 3, "status": "pending"
            }
        ])
    );
}

#[test]
fn export_rejects_unknown_format() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("requests.unknown");
    assert!(run_export(&conn, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
