//! Metan domain tools plugin
//!
//! An in-process `dt` plugin. The commands themselves are placeholder
//! business logic; the crate exists to exercise the extension-point
//! contract end to end.

use clap::{Arg, ArgAction, ArgMatches, Command};
use dt_core::{DtPlugin, Result};

/// Entry-point loader, referenced from the dispatcher's compiled-in
/// registration list.
pub fn load() -> Result<Box<dyn DtPlugin>> {
    Ok(Box::new(MetanPlugin))
}

pub struct MetanPlugin;

impl DtPlugin for MetanPlugin {
    fn name(&self) -> &str {
        "metan"
    }

    fn command(&self) -> Command {
        Command::new("metan")
            .about("Metan domain tools")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(
                Command::new("sync")
                    .about("Sync metan data from a source")
                    .arg(
                        Arg::new("source")
                            .help("Data source to sync from")
                            .required(true),
                    )
                    .arg(
                        Arg::new("dry-run")
                            .long("dry-run")
                            .short('n')
                            .action(ArgAction::SetTrue)
                            .help("Perform a dry run"),
                    ),
            )
            .subcommand(
                Command::new("report")
                    .about("Generate a metan report")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .short('f')
                            .default_value("json")
                            .help("Output format (json, csv, table)"),
                    )
                    .arg(
                        Arg::new("output")
                            .long("output")
                            .short('o')
                            .help("Output file path"),
                    ),
            )
            .subcommand(Command::new("status").about("Show metan system status"))
    }

    fn run(&self, matches: &ArgMatches) -> Result<i32> {
        match matches.subcommand() {
            Some(("sync", sub)) => {
                let source = sub
                    .get_one::<String>("source")
                    .expect("required argument");
                if sub.get_flag("dry-run") {
                    println!("[DRY RUN] Would sync from: {source}");
                } else {
                    println!("Syncing from: {source}");
                    println!("Sync complete!");
                }
            }
            Some(("report", sub)) => {
                let format = sub
                    .get_one::<String>("format")
                    .expect("defaulted argument");
                println!("Generating {format} report...");
                match sub.get_one::<String>("output") {
                    Some(output) => println!("Writing to: {output}"),
                    None => println!("Output to stdout"),
                }
                println!("Report generated!");
            }
            Some(("status", _)) => {
                println!("Metan Status");
                println!("{}", "=".repeat(40));
                println!("Connection: OK");
                println!("Last sync: N/A");
                println!("Records: 0");
            }
            _ => unreachable!("subcommand required"),
        }
        Ok(0)
    }
}
