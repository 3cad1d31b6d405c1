use std::ffi::OsString;

use structopt::StructOpt;

use crate::command::{CLICommand, CommandContext};
use crate::helper::error::EmptyQmResult;

static NAME: &str = "minimize";
static ABOUT: &str = "Reduce the current function to a minimal sum of products";

#[derive(Debug, StructOpt)]
#[structopt(name=NAME, about=ABOUT)]
struct Config {
    /// Show the selected implicants as ternary terms instead of an expression
    #[structopt(short, long)]
    terms: bool,
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
        &["min", "qm"]
    }

    fn run(&self, context: &mut CommandContext, args: &[OsString]) -> EmptyQmResult {
        let config: Config = Config::from_iter(args);

        let function = context.get_function()?;
        let cover = function.minimize()?;
        if config.terms {
            print!("{}", cover);
        } else {
            println!("{}", function.render(&cover));
        }
        Ok(())
    }
}
