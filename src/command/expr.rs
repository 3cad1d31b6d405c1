use std::ffi::OsString;

use log::info;
use structopt::StructOpt;

use crate::command::{CLICommand, CommandContext};
use crate::func::Function;
use crate::helper::error::EmptyQmResult;

static NAME: &str = "expr";
static ABOUT: &str = "Load a Boolean expression over variables x0, x1, ...";

#[derive(Debug, StructOpt)]
#[structopt(name=NAME, about=ABOUT)]
struct Config {
    /// The expression, using the operators ~ & ^ | and parentheses
    expression: String,

    /// Show the variables and minterms of the expression
    #[structopt(short, long)]
    show: bool,
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
        &["parse"]
    }

    fn run(&self, context: &mut CommandContext, args: &[OsString]) -> EmptyQmResult {
        let config: Config = Config::from_iter(args);

        info!("Parsing expression: {}", &config.expression);
        let function = Function::parse(&config.expression)?;
        if config.show {
            println!("{}", function);
        }
        context.set_function(function);
        Ok(())
    }
}
