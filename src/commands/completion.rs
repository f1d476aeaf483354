use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

/// Generate shell completions
///
/// Outputs the completion script to stdout, e.g.:
///   petfriends completion bash > ~/.local/share/bash-completion/completions/petfriends
///   petfriends completion zsh > ~/.zfunc/_petfriends
pub fn generate_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());

    // Hints go to stderr so redirected stdout stays a clean script
    match shell {
        Shell::Bash => {
            eprintln!();
            eprintln!(
                "# petfriends completion bash > ~/.local/share/bash-completion/completions/petfriends"
            );
        }
        Shell::Zsh => {
            eprintln!();
            eprintln!("# petfriends completion zsh > ~/.zfunc/_petfriends");
            eprintln!("# Then add to ~/.zshrc: fpath=(~/.zfunc $fpath); autoload -Uz compinit && compinit");
        }
        Shell::Fish => {
            eprintln!();
            eprintln!("# petfriends completion fish > ~/.config/fish/completions/petfriends.fish");
        }
        _ => {}
    }

    Ok(())
}
