use std::net::IpAddr;

use clap::{ArgAction, Args, Parser, Subcommand};
use domaincheck::{
    ServerConfig,
    config::{DEFAULT_BIND, DEFAULT_PORT},
};

#[derive(Parser)]
#[command(name = "domaincheck-server", version)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// augmente la verbosité des logs (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// n'affiche que les erreurs
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// lance le service HTTP (POST /verify-domain)
    Serve(ServeArgs),
    /// vérifie un domaine et affiche le verdict JSON
    Check {
        /// domaine à vérifier
        domain: String,
        /// JSON indenté
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// adresse d'écoute
    #[arg(long, default_value_t = DEFAULT_BIND)]
    pub bind: IpAddr,

    /// port d'écoute
    #[arg(long, short, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            port: DEFAULT_PORT,
        }
    }
}

impl ServeArgs {
    pub fn config(&self) -> ServerConfig {
        ServerConfig::new(self.bind, self.port)
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// sans sous-commande : `serve` avec les valeurs par défaut
    pub fn into_command(self) -> Commands {
        self.cmd
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }

    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
