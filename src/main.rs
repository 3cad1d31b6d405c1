use std::process;

use clap::AppSettings;
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use structopt::StructOpt;

use qmkit::command::{help_cmd, CommandContext, SelectedArgs};
use qmkit::helper::error::EmptyQmResult;

/// Reduce Boolean expressions to minimal sums of products.
///
/// Global options are followed by a chain of commands, run "qmkit help" to list them.
#[derive(Debug, StructOpt)]
#[structopt(name = "qmkit", global_settings = &[AppSettings::ColoredHelp, AppSettings::UnifiedHelpMessage])]
struct GlobalConfig {
    /// Increase the verbosity of logs (-v, -vv, -vvv)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not initialize the logger: {}", e);
    }
}

fn run(args: &mut SelectedArgs) -> EmptyQmResult {
    let global = GlobalConfig::from_iter(args.global_args());
    init_logger(global.verbose);

    let mut context = CommandContext::default();
    if !args.has_next() {
        return help_cmd(&mut context);
    }

    while args.has_next() {
        args.parse_next(&mut context)?;
    }
    debug!("All commands done");
    Ok(())
}

fn main() {
    let mut args = SelectedArgs::new();
    if let Err(e) = run(&mut args) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}
