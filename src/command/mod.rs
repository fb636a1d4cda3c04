//! External command execution
//!
//! Every network operation the archiver performs is delegated to an external
//! tool. This module defines the narrow capability those callers depend on:
//! run a program with arguments and hand back its exit status and captured
//! output. Failing to start the program is the only error; a non-zero exit is
//! data the caller has to interpret.

mod runner;

#[cfg(test)]
pub(crate) mod fake;

pub use runner::{CommandError, CommandOutput, CommandRunner, SystemRunner};

/// Renders a program invocation for logs and dry runs
///
/// Arguments containing whitespace are wrapped in double quotes.
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.chars().any(char::is_whitespace) || arg.is_empty() {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
