//! `scimf completions`: completion scripts generated from the clap definition.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell as ClapShell};

use crate::cli::{Cli, Shell};

fn clap_shell(shell: Shell) -> ClapShell {
    match shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::Powershell => ClapShell::PowerShell,
    }
}

/// Writes completions for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(clap_shell(shell), &mut cmd, "scimf", out);
}

/// Prints the completion script for `shell`.
///
/// # Errors
///
/// Fails when stdout cannot be flushed.
pub fn execute(shell: Shell) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_completions(shell, &mut stdout);
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completions(shell: Shell) -> String {
        let mut buffer = Vec::new();
        write_completions(shell, &mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_bash_completions() {
        let script = completions(Shell::Bash);
        assert!(script.contains("scimf"));
        assert!(script.contains("compare"));
    }

    #[test]
    fn test_every_shell_generates_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::Powershell] {
            assert!(!completions(shell).is_empty(), "{shell:?}");
        }
    }
}
