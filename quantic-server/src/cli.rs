use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quantic-server",
    about = "Quantic Gateway - dashboard server with embedded support chat",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Overrides PORT and the config file
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Overrides QUANTIC_STATIC_DIR and the config file
    #[arg(long, global = true)]
    pub static_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the gateway (default if no command specified)")]
    Serve,

    #[command(subcommand, about = "Inspect configuration")]
    Config(ConfigCommands),

    #[command(about = "Show whether paths are served locally or proxied")]
    Route {
        #[arg(required = true, help = "Request paths, e.g. /crm.html /app/login")]
        paths: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show the effective configuration (secrets masked)")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["quantic-server", "--port", "8080"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn test_route_requires_paths() {
        assert!(Cli::try_parse_from(["quantic-server", "route"]).is_err());
        let cli = Cli::try_parse_from(["quantic-server", "route", "/a.css", "/app"]).unwrap();
        match cli.command {
            Some(Commands::Route { paths }) => assert_eq!(paths, vec!["/a.css", "/app"]),
            _ => panic!("expected route command"),
        }
    }
}
