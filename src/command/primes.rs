use std::ffi::OsString;
use std::io;

use structopt::StructOpt;

use crate::command::{CLICommand, CommandContext};
use crate::func::display::{write_json, NamedTerm};
use crate::helper::error::EmptyQmResult;

static NAME: &str = "primes";
static ABOUT: &str = "Compute the prime implicants of the current function";

#[derive(Debug, StructOpt)]
#[structopt(name=NAME, about=ABOUT)]
struct Config {
    /// Output prime implicants as JSON
    #[structopt(short, long)]
    json: bool,
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
        &["pi", "implicants"]
    }

    fn run(&self, context: &mut CommandContext, args: &[OsString]) -> EmptyQmResult {
        let config: Config = Config::from_iter(args);

        let function = context.get_function()?;
        let primes = function.primes()?;

        if config.json {
            let stdout = io::stdout();
            write_json(&primes, function.variables(), &mut stdout.lock())?;
        } else {
            println!("PI ({}):", primes.len());
            for p in primes.iter() {
                let named = NamedTerm {
                    term: p,
                    namer: function.variables(),
                };
                println!("{}  {}", p, named);
            }
        }
        Ok(())
    }
}
