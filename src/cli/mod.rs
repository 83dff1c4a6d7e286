pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

/// Provision backing resources and keep layered service manifests in sync.
#[derive(Parser, Debug)]
#[command(name = "stratus", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory containing application manifests
    #[arg(long, global = true)]
    pub workspace: Option<String>,

    /// Verbose output
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision backing databases for an application
    Database {
        #[command(subcommand)]
        action: DatabaseAction,
    },

    /// Manage application secrets
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum DatabaseAction {
    /// Create a serverless database cluster in every environment
    Create {
        /// Project the application belongs to
        #[arg(short, long)]
        project: Option<String>,

        /// Application whose manifest records the database
        #[arg(short, long)]
        app: Option<String>,

        /// Name of the database
        #[arg(short = 'n', long = "db-name")]
        db_name: Option<String>,

        /// Type of database; mysql or postgresql
        #[arg(short, long)]
        engine: Option<String>,

        /// Name of the master user
        #[arg(short, long)]
        username: Option<String>,

        /// Password of the master user (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SecretAction {
    /// Add a secret
    #[command(alias = "create")]
    Add {
        /// Project the application belongs to
        #[arg(short, long)]
        project: Option<String>,

        /// Application whose manifest records the secret reference
        #[arg(short, long)]
        app: Option<String>,

        /// Scope the secret to a single environment
        #[arg(long)]
        env: Option<String>,

        /// Name of the secret, e.g. MY_SECRET
        #[arg(short = 'n', long = "secret-name")]
        name: Option<String>,

        /// Value to store (prompted when omitted)
        #[arg(short = 'v', long = "secret-value")]
        value: Option<String>,
    },
}
