use std::ffi::OsString;

use structopt::StructOpt;

use crate::command::{CLICommand, CommandContext};
use crate::func::Function;
use crate::helper::error::EmptyQmResult;

static NAME: &str = "minterms";
static ABOUT: &str = "Load a Boolean function from the list of its minterms";

#[derive(Debug, StructOpt)]
#[structopt(name=NAME, about=ABOUT)]
struct Config {
    /// Number of variables (by default, the number of bits of the largest minterm)
    #[structopt(short, long)]
    width: Option<usize>,

    /// Indices of the true rows of the truth table, the first variable being the most significant bit
    minterms: Vec<u64>,
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
        &["mt"]
    }

    fn run(&self, context: &mut CommandContext, args: &[OsString]) -> EmptyQmResult {
        let config: Config = Config::from_iter(args);

        let function = Function::from_minterms(&config.minterms, config.width)?;
        context.set_function(function);
        Ok(())
    }
}
