use std::ffi::OsString;

use structopt::StructOpt;

use crate::command::{CLICommand, CommandContext};
use crate::helper::error::{generic_error, EmptyQmResult};

static NAME: &str = "check";
static ABOUT: &str = "Minimize the current function, parse the result back and compare the minterms";

#[derive(Debug, StructOpt)]
#[structopt(name=NAME, about=ABOUT)]
struct Config {
    /// Only report failures
    #[structopt(short, long)]
    quiet: bool,
}

pub struct CLI;
impl CLICommand for CLI {
    fn name(&self) -> &'static str {
        NAME
    }
    fn about(&self) -> &'static str {
        ABOUT
    }

    fn aliases(&self) -> &[&'static str] {
        &["selftest"]
    }

    fn run(&self, context: &mut CommandContext, args: &[OsString]) -> EmptyQmResult {
        let config: Config = Config::from_iter(args);

        let function = context.get_function()?;
        let report = function.check()?;
        if !config.quiet {
            println!("variables: {}", function.variables());
            println!("minterms:  {:?}", function.minterms());
            println!("minimized: {}", report.expression);
            println!("reparsed:  {:?}", report.minterms);
        }

        if !report.matched {
            return Err(generic_error(format!(
                "Round-trip mismatch for \"{}\"",
                report.expression
            )));
        }
        if !config.quiet {
            println!("OK");
        }
        Ok(())
    }
}
