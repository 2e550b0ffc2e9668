// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("leaveledger")
        .about("Employee leave balances, monthly accrual, and vacation calendar")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("person")
                .about("Manage people")
                .subcommand(
                    Command::new("add")
                        .about("Add a person")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(
                            Arg::new("role")
                                .long("role")
                                .default_value("member")
                                .help("member or admin"),
                        )
                        .arg(
                            Arg::new("allowance")
                                .long("allowance")
                                .default_value("0")
                                .help("Annual allowance in days"),
                        )
                        .arg(
                            Arg::new("carryover")
                                .long("carryover")
                                .default_value("0")
                                .help("Days carried over from a prior period"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List people")))
                .subcommand(
                    Command::new("set")
                        .about("Edit a person's role, allowance, or carryover")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("role").long("role"))
                        .arg(Arg::new("allowance").long("allowance"))
                        .arg(Arg::new("carryover").long("carryover")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a person and their history")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(
                            Arg::new("as")
                                .long("as")
                                .required(true)
                                .help("Email of the acting admin"),
                        ),
                ),
        )
        .subcommand(
            Command::new("request")
                .about("Manage vacation requests")
                .subcommand(
                    Command::new("add")
                        .about("File a vacation request (created pending)")
                        .arg(Arg::new("person").long("person").required(true))
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(Arg::new("end").long("end").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List vacation requests")
                        .arg(Arg::new("person").long("person"))
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(Arg::new("status").long("status")),
                ))
                .subcommand(
                    Command::new("approve")
                        .about("Approve a request")
                        .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(
                    Command::new("deny")
                        .about("Deny a request")
                        .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a request")
                        .arg(Arg::new("id").long("id").required(true).value_parser(value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("adjust")
                .about("Manual ledger adjustments")
                .subcommand(
                    Command::new("add")
                        .about("Record a signed adjustment in days")
                        .arg(Arg::new("person").long("person").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Signed decimal days, e.g. -2.5"),
                        )
                        .arg(Arg::new("reason").long("reason").required(true))
                        .arg(Arg::new("date").long("date").help("Effective date, defaults to today")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List ledger entries for a person and year")
                        .arg(Arg::new("person").long("person").required(true))
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        ),
                )),
        )
        .subcommand(
            Command::new("accrue")
                .about("Monthly accrual")
                .subcommand(
                    Command::new("run")
                        .about("Run the accrual for the current month if not done yet")
                        .arg(Arg::new("as-of").long("as-of").help("Date override, YYYY-MM-DD")),
                ),
        )
        .subcommand(
            Command::new("balance")
                .about("Balances")
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Balance for one person and year")
                        .arg(Arg::new("person").long("person").required(true))
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("team")
                        .about("Balance overview for everyone")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("calendar")
                .about("Who is away, day by day, for one month")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32)),
                )
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_parser(value_parser!(u32)),
                ),
        ))
        .subcommand(
            Command::new("report").about("Reports").subcommand(json_flags(
                Command::new("yearly")
                    .about("Approved vacation days per month and per person")
                    .arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32)),
                    ),
            )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("requests")
                    .about("Export vacation requests starting in a year")
                    .arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32)),
                    )
                    .arg(Arg::new("format").long("format").default_value("csv"))
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}
