use clap::{Args, Parser, Subcommand};

/// Caching proxy: forwards GET requests to an origin and serves repeats
/// from memory for 60 seconds.
#[derive(Debug, Parser)]
#[command(name = "stash", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the proxy server.
    Start(StartArgs),
}

#[derive(Debug, Args)]
pub struct StartArgs {
    /// The port number for the proxy server to listen on.
    #[arg(long, env = "PORT", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// The origin URL the proxy forwards requests to.
    #[arg(long, env = "ORIGIN")]
    pub origin: Option<String>,

    /// Optional TOML config file (missing file is fine).
    #[arg(long, default_value = "stash.toml")]
    pub config: String,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn parses_space_and_equals_forms() {
        let cli = Cli::try_parse_from([
            "stash", "start", "--port", "3000", "--origin=http://dummyjson.com",
        ])
        .expect("valid args");
        let Command::Start(args) = cli.command;
        assert_eq!(args.port, Some(3000));
        assert_eq!(args.origin.as_deref(), Some("http://dummyjson.com"));
        assert_eq!(args.config, "stash.toml");

        let cli = Cli::try_parse_from(["stash", "start", "--port=8080", "--origin", "http://x.io"])
            .expect("valid args");
        let Command::Start(args) = cli.command;
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["stash", "start", "--port", "0"]).is_err());
        assert!(Cli::try_parse_from(["stash", "start", "--port", "70000"]).is_err());
        assert!(Cli::try_parse_from(["stash", "start", "--port", "abc"]).is_err());
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(Cli::try_parse_from(["stash", "stop"]).is_err());
    }
}
