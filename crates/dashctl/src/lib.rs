//! `dashctl` - research records dashboard from the command line
//!
//! ```text
//! dashctl summarize --data records.json --region "Northern America" [--json]
//! dashctl options   --data records.json [--json]
//! dashctl fetch     [--config dashboard.toml] [--base-url URL] --topic oil [--json]
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod logging;
pub mod render;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dash_filters::FilterSelection;
use dash_records::RecordField;
use std::path::PathBuf;

/// Filter flags in panel order
const FILTER_FLAGS: [(RecordField, &str); 7] = [
    (RecordField::EndYear, "end-year"),
    (RecordField::Topic, "topic"),
    (RecordField::Sector, "sector"),
    (RecordField::Pestle, "pestle"),
    (RecordField::Source, "source"),
    (RecordField::Country, "country"),
    (RecordField::Region, "region"),
];

fn filter_args(cmd: Command) -> Command {
    FILTER_FLAGS.iter().fold(cmd, |cmd, (field, flag)| {
        cmd.arg(
            Arg::new(*flag)
                .long(*flag)
                .value_name("VALUE")
                .help(format!("Only records whose {} equals VALUE", field.display_name())),
        )
    })
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Dashboard configuration (TOML)")
}

fn data_arg() -> Arg {
    Arg::new("data")
        .long("data")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Records as a JSON list or paged object")
}

/// Command-line definition
#[must_use]
pub fn build_cli() -> Command {
    Command::new("dashctl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Research records dashboard")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(filter_args(
            Command::new("summarize")
                .about("Aggregate a local dataset into the six panels")
                .arg(data_arg())
                .arg(config_arg())
                .arg(json_flag()),
        ))
        .subcommand(
            Command::new("options")
                .about("List dropdown choices for a local dataset")
                .arg(data_arg())
                .arg(json_flag()),
        )
        .subcommand(filter_args(
            Command::new("fetch")
                .about("Query the record service and summarize the result")
                .arg(config_arg())
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Override api_base_url from the configuration"),
                )
                .arg(json_flag()),
        ))
}

/// Filter selection from the subcommand's flags
///
/// # Errors
/// If a flag maps to no known field
pub fn selection_from_args(args: &ArgMatches) -> anyhow::Result<FilterSelection> {
    FILTER_FLAGS
        .iter()
        .try_fold(FilterSelection::default(), |selection, (field, flag)| {
            match args.get_one::<String>(flag) {
                Some(value) => selection
                    .set_field(field.selection_name(), value)
                    .context("building filter selection"),
                None => Ok(selection),
            }
        })
}

/// Dispatch parsed arguments and return what to print
///
/// # Errors
/// Unreadable inputs, invalid configuration or a failed fetch
pub async fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("summarize", args)) => {
            let data = required_path(args, "data")?;
            let selection = selection_from_args(args)?;
            commands::summarize(&data, args.get_one::<PathBuf>("config"), &selection, args.get_flag("json"))
        }
        Some(("options", args)) => {
            let data = required_path(args, "data")?;
            commands::options(&data, args.get_flag("json"))
        }
        Some(("fetch", args)) => {
            let selection = selection_from_args(args)?;
            commands::fetch(
                args.get_one::<PathBuf>("config"),
                args.get_one::<String>("base-url").map(String::as_str),
                &selection,
                args.get_flag("json"),
            )
            .await
        }
        Some((other, _)) => anyhow::bail!("unknown subcommand: {other}"),
        None => anyhow::bail!("no subcommand given"),
    }
}

fn required_path(args: &ArgMatches, id: &str) -> anyhow::Result<PathBuf> {
    args.get_one::<PathBuf>(id)
        .cloned()
        .with_context(|| format!("missing --{id}"))
}
