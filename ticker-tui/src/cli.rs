use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ticker-tui")]
#[command(about = "Terminal UI for optimistic timer tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a ticker-api server
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_case_subcommands() {
        let cli = Cli::try_parse_from(["ticker-tui", "config-path"]).unwrap();
        assert!(matches!(cli.command, Commands::ConfigPath));

        let cli = Cli::try_parse_from(["ticker-tui", "dev"]).unwrap();
        assert!(matches!(cli.command, Commands::Dev));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["ticker-tui"]).is_err());
    }
}
