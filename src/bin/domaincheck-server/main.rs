mod args;
mod logging;

use anyhow::{Context, Result};
use domaincheck::{serve, system_resolver, verify_domain};

use crate::args::{Cli, Commands, ServeArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.default_log_level());

    match cli.into_command() {
        Commands::Serve(args) => run_server(&args).await,
        Commands::Check { domain, pretty } => run_check(&domain, pretty).await,
    }
}

async fn run_server(args: &ServeArgs) -> Result<()> {
    let config = args.config();
    serve(&config, system_resolver())
        .await
        .with_context(|| format!("serve on {}", config.socket_addr()))
}

async fn run_check(domain: &str, pretty: bool) -> Result<()> {
    let domain = domain.trim();
    if domain.is_empty() {
        eprintln!("domaine requis");
        // codes de sortie : 0 verdict produit, 2 domaine vide, 1 fatal
        std::process::exit(2);
    }

    let result = verify_domain(&system_resolver(), domain).await;
    let out = if pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("encode verdict")?;
    println!("{out}");
    Ok(())
}
