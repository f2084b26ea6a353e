//! Shell completions command implementation.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, shells};

use crate::cli::{Cli, Shell};
use crate::error::Result;

const BIN_NAME: &str = "locale-sync";

/// Print the completion script for `shell` to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed.
pub fn execute(shell: &Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    render(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

fn render(shell: &Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, BIN_NAME, out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, BIN_NAME, out),
        Shell::Fish => generate(shells::Fish, &mut cmd, BIN_NAME, out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, BIN_NAME, out),
        Shell::Elvish => generate(shells::Elvish, &mut cmd, BIN_NAME, out),
    }
}
