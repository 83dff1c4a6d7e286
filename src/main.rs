mod adapters;
mod cli;
mod core;

use clap::Parser;

use cli::commands::database_create::DatabaseCreateRequest;
use cli::commands::secret_add::SecretAddRequest;
use cli::{Cli, Commands, DatabaseAction, SecretAction};

fn main() {
    let args = Cli::parse();

    cli::context::init(args.workspace.as_deref());

    let result = match args.command {
        Commands::Database { action } => match action {
            DatabaseAction::Create {
                project,
                app,
                db_name,
                engine,
                username,
                password,
            } => cli::commands::database_create::execute(
                DatabaseCreateRequest {
                    project,
                    app,
                    db_name,
                    engine,
                    username,
                    password,
                },
                args.verbose,
            ),
        },
        Commands::Secret { action } => match action {
            SecretAction::Add {
                project,
                app,
                env,
                name,
                value,
            } => cli::commands::secret_add::execute(
                SecretAddRequest {
                    project,
                    app,
                    env,
                    name,
                    value,
                },
                args.verbose,
            ),
        },
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
