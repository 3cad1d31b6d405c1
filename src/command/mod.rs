//! Define commands for the Command Line Interface
//!
//! This module provides facilities to register a collection of commands, where each command,
//! defined in a private submodule, is a thin wrapper over core API features.
//!
//! The CLI enables to chain several commands, each can use and modify a global context, currently
//! limited to the current Boolean function. The global CLI will thus start by searching command
//! names in the full list of arguments. The arguments between two successive commands define the
//! arguments of the first command.
//!
//! # Example
//!
//! The following command:
//!
//! ```qmkit -v expr "x0 & x1 | x0 & ~x1" primes minimize```
//!
//! defines the following subcommands:
//! * **expr** ```"x0 & x1 | x0 & ~x1"```
//! * **primes**
//! * **minimize**
//!
//! The arguments before the first command (here ```-v```) are global options.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::sync::Arc;

use itertools::Itertools;

use crate::func::Function;
use crate::helper::error::{generic_error, EmptyQmResult, QmError, QmResult};

// Use a macro to load all command modules and add them to the list of available commands
macro_rules! cmdmods {
    ( $( $x:ident ),* ) => {
        $( mod $x; )*
        /// Single-instance CommandManager created and filled at runtime
        static COMMANDS: Lazy<CommandManager> = Lazy::new(|| {
            CommandManager::default()
            $(  .register( Arc::new( $x::CLI{}))  )*
        });
    };
}

// Define all available commands
cmdmods!(help, expr, minterms, primes, minimize, check);

pub fn help_cmd(context: &mut CommandContext) -> EmptyQmResult {
    let cmd = COMMANDS
        .get_command("help")
        .ok_or_else(|| generic_error(String::from("Missing help command")))?;
    cmd.run(context, &[])
}

/// Split the list of CLI parameters into separate slices for each successive command.
///
/// Scan the list of parameters to search for known commands and will consider that
/// they denote the start of the next command.
pub struct SelectedArgs {
    all_args: Vec<OsString>,
    next_slice: usize,
}

/// Register and retrieve commands
#[derive(Default)]
pub struct CommandManager {
    services: HashMap<&'static str, Arc<dyn CLICommand>>,
    aliases: HashMap<&'static str, &'static str>,
}

impl CommandManager {
    pub fn register(mut self, action: Arc<dyn CLICommand>) -> Self {
        let name = action.name();
        for alias in action.aliases().iter() {
            self.aliases.insert(alias, name);
        }
        self.services.insert(name, action);
        self
    }

    fn unroll_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).unwrap_or(&name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(self.unroll_alias(name))
    }

    pub fn get_command(&self, name: &str) -> Option<Arc<dyn CLICommand>> {
        self.services.get(self.unroll_alias(name)).map(Arc::clone)
    }

    pub fn print_commands(&self) {
        println!("Available commands");
        println!("==================");
        for (name, cmd) in self.services.iter().sorted_by_key(|(name, _)| **name) {
            if cmd.aliases().is_empty() {
                println!("  {:20} {}", name, cmd.about());
            } else {
                let aliases = cmd.aliases().join(", ");
                println!("  {:20} {} (aliases: {})", name, cmd.about(), aliases);
            }
        }
    }
}

/// The execution context to allow successive commands to share a function
#[derive(Default)]
pub struct CommandContext {
    function: Option<Function>,
}

impl CommandContext {
    pub fn get_function(&self) -> QmResult<&Function> {
        self.function.as_ref().ok_or(QmError::MissingFunction())
    }

    pub fn set_function(&mut self, function: Function) {
        self.function = Some(function);
    }
}

/// API for individual commands
pub trait CLICommand: Sync + Send {
    fn name(&self) -> &'static str;

    fn about(&self) -> &'static str;

    fn aliases(&self) -> &[&'static str] {
        &[]
    }

    fn run(&self, context: &mut CommandContext, args: &[OsString]) -> EmptyQmResult;
}

impl SelectedArgs {
    pub fn new() -> Self {
        Self::from_args(env::args_os())
    }

    pub fn from_args<I: IntoIterator<Item = OsString>>(args: I) -> Self {
        SelectedArgs {
            all_args: args.into_iter().collect(),
            next_slice: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next_slice < self.all_args.len()
    }

    /// Retrieve the global arguments, located before the first command.
    ///
    /// The first slice includes the name of the program.
    pub fn global_args(&mut self) -> &[OsString] {
        if self.next_slice > 0 {
            return &[];
        }
        self.scan()
    }

    pub fn parse_next(&mut self, context: &mut CommandContext) -> EmptyQmResult {
        self.run_next_command(context, &COMMANDS)
    }

    fn run_next_command(
        &mut self,
        context: &mut CommandContext,
        manager: &CommandManager,
    ) -> EmptyQmResult {
        let next_command = self.all_args[self.next_slice].to_string_lossy().into_owned();
        let cmd = match manager.get_command(&next_command) {
            None => {
                return Err(generic_error(format!("Unknown command \"{}\"", next_command)));
            }
            Some(c) => c,
        };

        let next_args = self.scan();

        cmd.run(context, next_args)
    }

    fn scan(&mut self) -> &[OsString] {
        let start = self.next_slice;

        // Find the end of the next slice!
        let mut end = self.all_args.len();
        for i in start + 1..end {
            let cur = self.all_args[i].to_string_lossy();
            if COMMANDS.contains(&cur) {
                end = i;
                break;
            }
        }

        self.next_slice = end;
        &self.all_args[start..end]
    }
}

impl Default for SelectedArgs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> SelectedArgs {
        SelectedArgs::from_args(values.iter().map(OsString::from))
    }

    #[test]
    fn test_split_arguments() {
        let mut selected = args(&["qmkit", "-v", "expr", "x0 | x1", "min", "--terms"]);
        assert_eq!(selected.global_args(), &["qmkit", "-v"]);
        assert!(selected.has_next());
        assert_eq!(selected.scan(), &["expr", "x0 | x1"]);
        assert_eq!(selected.scan(), &["min", "--terms"]);
        assert!(!selected.has_next());
    }

    #[test]
    fn test_run_chain() {
        let mut selected = args(&["qmkit", "minterms", "-w", "3", "1", "3", "5", "7", "check"]);
        let mut context = CommandContext::default();
        selected.global_args();
        while selected.has_next() {
            selected.parse_next(&mut context).unwrap();
        }
        let func = context.get_function().unwrap();
        assert_eq!(func.minterms(), &[1, 3, 5, 7]);
        assert_eq!(func.width(), 3);
    }

    #[test]
    fn test_missing_function() {
        let mut selected = args(&["qmkit", "minimize"]);
        let mut context = CommandContext::default();
        selected.global_args();
        assert!(matches!(
            selected.parse_next(&mut context),
            Err(QmError::MissingFunction())
        ));
    }

    #[test]
    fn test_aliases() {
        assert!(COMMANDS.contains("qm"));
        assert!(COMMANDS.contains("pi"));
        assert!(COMMANDS.contains("selftest"));
        assert!(!COMMANDS.contains("x0"));
        assert_eq!(COMMANDS.get_command("min").map(|c| c.name()), Some("minimize"));
    }
}
