//! Shell-safe command construction
//!
//! Remote commands are sent to `ssh` as a single string and interpreted by the
//! remote login shell. A [`ShellCommand`] can only be extended with
//! `&'static str` fragments or with a [`ShellArg`], and a `ShellArg` can only be
//! produced by quoting. Runtime strings therefore cannot reach the command line
//! unquoted.

use std::fmt;

/// A single value quoted for a POSIX shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellArg(String);

impl ShellArg {
    /// Quote an arbitrary string with single quotes.
    pub fn quote(raw: impl AsRef<str>) -> Self {
        Self(format!("'{}'", raw.as_ref().replace('\'', "'\\''")))
    }

    /// Integers never need quoting.
    pub fn number(n: u64) -> Self {
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShellArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A shell command line assembled from literal fragments and quoted arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    line: String,
}

impl ShellCommand {
    pub fn new(program: &'static str) -> Self {
        Self {
            line: program.to_string(),
        }
    }

    /// Append a literal fragment (flags, operators, fixed patterns).
    pub fn lit(mut self, fragment: &'static str) -> Self {
        self.line.push(' ');
        self.line.push_str(fragment);
        self
    }

    /// Append a quoted argument.
    pub fn arg(mut self, arg: &ShellArg) -> Self {
        self.line.push(' ');
        self.line.push_str(arg.as_str());
        self
    }

    pub fn args<'a>(self, args: impl IntoIterator<Item = &'a ShellArg>) -> Self {
        args.into_iter().fold(self, |cmd, arg| cmd.arg(arg))
    }

    /// Chain another command that only runs if this one succeeded.
    pub fn and(mut self, next: ShellCommand) -> Self {
        self.line.push_str(" && ");
        self.line.push_str(&next.line);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.line
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}
