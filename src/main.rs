use clap::Parser;
use kubeprops::cli::{Cli, Commands, ConfigAction, ServeOpts};
use kubeprops::config::{validate_config, Config};
use kubeprops::gateway::KubepropsServer;
use kubeprops::infra::data::ProcessEnv;
use kubeprops::logging;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Serve(ServeOpts::default()));

    let mut config = Config::load(command.config_path())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    logging::init(&config.logging);

    for problem in validate_config(&config) {
        warn!("Config problem at {}", problem);
    }

    match command {
        Commands::Serve(opts) => {
            info!("Starting kubeprops server");
            let server = KubepropsServer::start(&config, &opts, Arc::new(ProcessEnv::new()))?;
            server.run_until_shutdown().await?;
        }
        Commands::Check(_) => {
            let diagnostics =
                kubeprops::infra::doctor::run_diagnostics(&config, Arc::new(ProcessEnv::new()));
            print!("{diagnostics}");
        }
        Commands::Config(opts) => match opts.action {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Validate => {
                let problems = validate_config(&config);
                if problems.is_empty() {
                    info!("Configuration is valid");
                } else {
                    anyhow::bail!("{} configuration problem(s) found", problems.len());
                }
            }
            ConfigAction::Init => {
                Config::write_default(opts.config.as_deref().unwrap_or("kubeprops.yaml"))?;
                info!("Configuration file created");
            }
        },
        Commands::Version => {
            println!("kubeprops {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
