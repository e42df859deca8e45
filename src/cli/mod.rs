use crate::config::LogFormat;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kubeprops",
    version,
    about = "Serve secrets.yml and configs.yml as JSON"
)]
pub struct Cli {
    /// Log output format; overrides the config file.
    #[arg(long, global = true, env = "KUBEPROPS_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default).
    Serve(ServeOpts),
    /// Report detected environment and document availability.
    Check(CheckOpts),
    Config(ConfigOpts),
    Version,
}

#[derive(clap::Args, Default)]
pub struct ServeOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[arg(short, long)]
    pub port: Option<u16>,
    #[arg(short, long)]
    pub bind: Option<String>,
}

#[derive(clap::Args)]
pub struct CheckOpts {
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(clap::Args)]
pub struct ConfigOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Validate,
    Init,
}

impl Commands {
    /// Config file path passed to the command, if any.
    pub fn config_path(&self) -> Option<&str> {
        match self {
            Commands::Serve(opts) => opts.config.as_deref(),
            Commands::Check(opts) => opts.config.as_deref(),
            Commands::Config(opts) => opts.config.as_deref(),
            Commands::Version => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["kubeprops"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_flags_parse() {
        let cli =
            Cli::try_parse_from(["kubeprops", "serve", "--port", "8080", "--bind", "127.0.0.1"])
                .unwrap();
        match cli.command {
            Some(Commands::Serve(opts)) => {
                assert_eq!(opts.port, Some(8080));
                assert_eq!(opts.bind.as_deref(), Some("127.0.0.1"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn global_log_format_parses() {
        let cli = Cli::try_parse_from(["kubeprops", "check", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(cli.command.unwrap().config_path().is_none());
    }

    #[test]
    fn invalid_log_format_rejected() {
        assert!(Cli::try_parse_from(["kubeprops", "--log-format", "xml"]).is_err());
    }
}
