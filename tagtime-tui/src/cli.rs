use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tagtime")]
#[command(about = "Terminal timer with tags for a time-tracking backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run against the configured backend (default)
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_run() {
        let cli = Cli::try_parse_from(["tagtime"]).unwrap();
        assert_eq!(cli.command(), Commands::Run);
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["tagtime", "config-path"]).unwrap();
        assert_eq!(cli.command(), Commands::ConfigPath);
        let cli = Cli::try_parse_from(["tagtime", "dev"]).unwrap();
        assert_eq!(cli.command(), Commands::Dev);
    }
}
