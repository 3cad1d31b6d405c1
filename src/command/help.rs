use std::ffi::OsString;

use crate::command::{CLICommand, CommandContext, COMMANDS};
use crate::helper::error::EmptyQmResult;

static NAME: &str = "help";
static ABOUT: &str = "List available commands";

pub struct CLI;
impl CLICommand for CLI {
    fn name(&self) -> &'static str {
        NAME
    }
    fn about(&self) -> &'static str {
        ABOUT
    }

    fn run(&self, _context: &mut CommandContext, _args: &[OsString]) -> EmptyQmResult {
        COMMANDS.print_commands();
        Ok(())
    }
}
