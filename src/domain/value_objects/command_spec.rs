//! Command Spec Value Object
//!
//! The external command run on every cycle: a program and its arguments.

use std::fmt;

use crate::error::{RerunError, RerunResult};

/// Program plus arguments, guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    /// Build a command from a program and its arguments.
    ///
    /// Fails with a configuration error when the program is blank.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> RerunResult<Self> {
        let program = program.into();
        if program.trim().is_empty() {
            return Err(RerunError::configuration("no command to run"));
        }
        Ok(Self { program, args })
    }

    /// Build a command from an argv-style list (`["pytest", "-q"]`)
    pub fn from_argv<I, S>(argv: I) -> RerunResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = argv.into_iter().map(Into::into);
        let program = iter
            .next()
            .ok_or_else(|| RerunError::configuration("no command to run"))?;
        Self::new(program, iter.collect())
    }

    /// Parse a whitespace-separated command line (`"pytest -x -q"`).
    ///
    /// Quotes are not interpreted; use the config file or `--` for
    /// arguments containing spaces.
    pub fn parse(line: &str) -> RerunResult<Self> {
        Self::from_argv(line.split_whitespace())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_program_and_args() {
        let cmd = CommandSpec::parse("pytest -x  -q").unwrap();
        assert_eq!(cmd.program(), "pytest");
        assert_eq!(cmd.args(), &["-x".to_string(), "-q".to_string()]);
        assert_eq!(cmd.to_string(), "pytest -x -q");
    }

    #[test]
    fn blank_command_is_configuration_error() {
        assert!(matches!(
            CommandSpec::parse("   "),
            Err(RerunError::Configuration { .. })
        ));
        assert!(matches!(
            CommandSpec::from_argv(Vec::<String>::new()),
            Err(RerunError::Configuration { .. })
        ));
    }
}
