use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    gitopsi completions bash > ~/.bash_completion.d/gitopsi\n\n\
                  Generate zsh completions:\n    gitopsi completions zsh > ~/.zfunc/_gitopsi\n\n\
                  Generate fish completions:\n    gitopsi completions fish > ~/.config/fish/completions/gitopsi.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
