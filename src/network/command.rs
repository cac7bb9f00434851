// file: src/network/command.rs
// version: 1.0.0
// guid: 2d8c41f7-5e03-4a9b-b6d1-7f3e92a0c815

//! Typed remote commands
//!
//! Every command the toolkit sends to the host is built here from a program
//! name and an explicit argument list. Rendering quotes each argument for the
//! remote shell, so template names or paths can never inject shell syntax.

use serde::Serialize;
use std::fmt;

/// A program plus its arguments, to be executed on the remote host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteCommand {
    program: String,
    args: Vec<String>,
}

impl RemoteCommand {
    /// Create a command without arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render as a single command line for the remote shell
    pub fn render(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| shell_quote(part))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Report the host's version; doubles as the connectivity probe
    pub fn version() -> Self {
        Self::new("pveversion")
    }

    /// List templates the repository offers in one section
    pub fn list_available(section: &str) -> Self {
        Self::new("pveam").arg("available").arg("--section").arg(section)
    }

    /// Refresh the host's template index
    pub fn refresh_index() -> Self {
        Self::new("pveam").arg("update")
    }

    /// Exit 0 when the given path is a regular file
    pub fn file_exists(path: &str) -> Self {
        Self::new("test").arg("-f").arg(path)
    }

    /// Download a template into the given storage
    pub fn download(storage: &str, template: &str) -> Self {
        Self::new("pveam").arg("download").arg(storage).arg(template)
    }

    /// List a directory, one entry per line, newest first
    pub fn list_directory(dir: &str) -> Self {
        Self::new("ls").arg("-1t").arg(dir)
    }

    /// Remove a file, ignoring a missing one
    pub fn remove_file(path: &str) -> Self {
        Self::new("rm").arg("-f").arg(path)
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Quote one word for a POSIX shell
fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:@%+=,".contains(c));

    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
