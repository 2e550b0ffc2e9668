// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use leaveledger::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("person", sub)) => commands::people::handle(&conn, sub)?,
        Some(("request", sub)) => commands::requests::handle(&conn, sub)?,
        Some(("adjust", sub)) => commands::adjustments::handle(&conn, sub)?,
        Some(("accrue", sub)) => commands::accrual::handle(&mut conn, sub)?,
        Some(("balance", sub)) => commands::balance::handle(&mut conn, sub)?,
        Some(("calendar", sub)) => commands::calendar::handle(&mut conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
