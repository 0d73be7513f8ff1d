use clap::{ArgAction, Args, Parser, Subcommand};
use kurz_storage::DEFAULT_STORE_PATH;
use std::net::IpAddr;
use std::path::PathBuf;

pub const STORE_PATH_ENV: &str = "KURZ_STORE_PATH";
pub const HOST_ENV: &str = "KURZ_HOST";
pub const PORT_ENV: &str = "KURZ_PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Parser)]
#[command(
    name = "kurz",
    version,
    about = "Manage short URL redirects and serve them over HTTP",
    disable_help_subcommand = true,
    disable_help_flag = true
)]
pub struct CLI {
    /// Print usage to stderr
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,

    /// YAML file holding the redirects
    #[arg(
        long,
        global = true,
        env = STORE_PATH_ENV,
        default_value = DEFAULT_STORE_PATH,
        value_name = "PATH"
    )]
    pub store_path: PathBuf,

    /// List all redirects with their hit counts
    #[arg(short = 'l', long = "list", conflicts_with = "delete")]
    pub list: bool,

    /// Print the list as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Delete the redirect stored under KEY
    #[arg(short = 'd', long = "delete", value_name = "KEY")]
    pub delete: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a redirect, replacing any redirect with the same key
    Configure(ConfigureArgs),
    /// Serve redirects over HTTP
    Run(RunArgs),
    /// Create an empty store file if none exists
    Init,
}

#[derive(Debug, Args)]
pub struct ConfigureArgs {
    /// Key to store the redirect under; a random 8 character key if omitted
    #[arg(short = 'a', long = "append", value_name = "KEY")]
    pub key: Option<String>,

    /// URL to redirect to
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Port to listen on
    #[arg(short = 'p', long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to listen on
    #[arg(long, env = HOST_ENV, default_value = DEFAULT_HOST)]
    pub host: IpAddr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        CLI::command().debug_assert();
    }

    #[test]
    fn configure_flags() {
        let cli =
            CLI::try_parse_from(["kurz", "configure", "-a", "abc", "-u", "http://x"]).unwrap();
        match cli.command {
            Some(Command::Configure(args)) => {
                assert_eq!(args.key.as_deref(), Some("abc"));
                assert_eq!(args.url.as_deref(), Some("http://x"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_defaults() {
        let cli = CLI::try_parse_from(["kurz", "run"]).unwrap();
        match cli.command {
            Some(Command::Run(args)) => {
                assert_eq!(args.port, DEFAULT_PORT);
                assert_eq!(args.host.to_string(), DEFAULT_HOST);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn store_path_after_subcommand() {
        let cli = CLI::try_parse_from(["kurz", "run", "--store-path", "other.yaml"]).unwrap();
        assert_eq!(cli.store_path, PathBuf::from("other.yaml"));
    }

    #[test]
    fn list_and_delete_conflict() {
        assert!(CLI::try_parse_from(["kurz", "-l", "-d", "abc"]).is_err());
    }

    #[test]
    fn store_path_before_subcommand() {
        let cli = CLI::try_parse_from(["kurz", "--store-path", "other.yaml", "init"]).unwrap();
        assert_eq!(cli.store_path, PathBuf::from("other.yaml"));
        assert!(matches!(cli.command, Some(Command::Init)));
    }

    #[test]
    fn help_is_a_plain_flag() {
        let cli = CLI::try_parse_from(["kurz", "-h"]).unwrap();
        assert!(cli.help);
        assert!(cli.command.is_none());
    }

    #[test]
    fn json_requires_list() {
        assert!(CLI::try_parse_from(["kurz", "--json"]).is_err());
        assert!(CLI::try_parse_from(["kurz", "-l", "--json"]).is_ok());
    }
}
