use indicatif::ProgressBar;

use crate::adapters::directory::toml_directory::TomlDirectory;
use crate::adapters::gateway::local_gateway::LocalGateway;
use crate::adapters::prompt::dialoguer_prompt::DialoguerPrompter;
use crate::adapters::store::yaml_manifest_store::YamlManifestStore;
use crate::cli::output;
use crate::core::errors::{Result, StratusError};
use crate::core::models::run_record::RunAction;
use crate::core::services::cancel::CancelToken;
use crate::core::services::database_provisioner::{DatabaseProvisioner, DatabaseRequest};
use crate::core::traits::directory::{ApplicationReader, EnvironmentReader, ProjectReader};
use crate::core::traits::prompter::Prompter;

/// Engines the gateway knows how to provision.
const ENGINES: [&str; 2] = ["mysql", "postgresql"];

/// Fields collected for `stratus database create`, each optional until
/// validation and prompting have run.
#[derive(Debug, Default)]
pub struct DatabaseCreateRequest {
    pub project: Option<String>,
    pub app: Option<String>,
    pub db_name: Option<String>,
    pub engine: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Execute the `stratus database create` command.
///
/// Validates the supplied selectors against the directory, prompts for
/// whatever is still missing, then provisions the cluster in every
/// environment of the project and saves the identifiers to the
/// application's manifest.
pub fn execute(mut request: DatabaseCreateRequest, verbose: bool) -> Result<()> {
    let stratus_dir = crate::cli::context::stratus_dir();
    let directory = TomlDirectory::load(&stratus_dir)?;

    validate(&request, &directory)?;
    ask(&mut request, &directory, &DialoguerPrompter)?;
    let (project, app, db) = request.into_complete()?;

    // The application may have been supplied before the project was
    // known; check the pair now that both are settled.
    directory.get_application(&project, &app)?;

    let store = YamlManifestStore::new(crate::cli::context::workspace_dir().to_path_buf());
    let gateway = LocalGateway::new(stratus_dir.join("state"));
    let provisioner = DatabaseProvisioner {
        environments: &directory,
        databases: &gateway,
        secrets: &gateway,
        store: &store,
    };

    output::header(&format!("Creating database: {}", db.database_name));

    let total = directory.list_environments(&project)?.len() as u64;
    let bar = ProgressBar::new(total);
    let provisioned = provisioner.provision(&project, &app, &db, &CancelToken::new(), |env| {
        bar.println(format!("  Creating cluster in environment '{env}'..."));
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    if verbose {
        for entry in &provisioned {
            output::success(&format!(
                "{}: {} -> {}:{}",
                entry.environment,
                entry.cluster_identifier,
                entry.endpoint,
                entry.port
            ));
        }
    }

    output::success(&format!(
        "Created the database {} in {} under project {}.",
        output::user_input(&db.database_name),
        output::resource(&app),
        output::resource(&project)
    ));
    output::success("Created a secret with the database password.");
    output::success("Saved the parameters of the database to the manifest.");

    super::history_helpers::record_run(
        RunAction::DatabaseCreate,
        &project,
        &app,
        &db.database_name,
        provisioned.into_iter().map(|p| p.environment).collect(),
        Some(format!("engine {}", db.engine)),
    );

    Ok(())
}

/// Fail fast on selectors that do not exist or fields with an invalid
/// shape. Only supplied fields are checked; missing ones are collected
/// by the ask steps.
fn validate(request: &DatabaseCreateRequest, directory: &TomlDirectory) -> Result<()> {
    if let Some(project) = &request.project {
        directory.get_project(project)?;
        if let Some(app) = &request.app {
            directory.get_application(project, app)?;
        }
    }
    if let Some(name) = &request.db_name {
        crate::cli::context::validate_name(name, "database name")?;
    }
    if let Some(engine) = &request.engine {
        validate_engine(engine)?;
    }
    Ok(())
}

fn validate_engine(engine: &str) -> Result<()> {
    if ENGINES.contains(&engine) {
        Ok(())
    } else {
        Err(StratusError::Validation {
            field: "engine".into(),
            detail: format!("'{engine}' is not supported; use mysql or postgresql"),
        })
    }
}

/// Collect required fields that were not passed as flags. Each step
/// short-circuits when its field is already set, so nothing is ever
/// requested twice.
fn ask(
    request: &mut DatabaseCreateRequest,
    directory: &TomlDirectory,
    prompter: &dyn Prompter,
) -> Result<()> {
    ask_project(request, directory, prompter)?;
    ask_app(request, directory, prompter)?;
    ask_db_name(request, prompter)?;
    ask_engine(request, prompter)?;
    ask_username(request, prompter)?;
    ask_password(request, prompter)
}

fn ask_project(
    request: &mut DatabaseCreateRequest,
    projects: &dyn ProjectReader,
    prompter: &dyn Prompter,
) -> Result<()> {
    if request.project.is_some() {
        return Ok(());
    }
    let names: Vec<String> = projects
        .list_projects()?
        .into_iter()
        .map(|p| p.name)
        .collect();
    let project = prompter.select(
        "Which project",
        "The project that owns the application.",
        &names,
    )?;
    request.project = Some(project);
    Ok(())
}

fn ask_app(
    request: &mut DatabaseCreateRequest,
    applications: &dyn ApplicationReader,
    prompter: &dyn Prompter,
) -> Result<()> {
    if request.app.is_some() {
        return Ok(());
    }
    let Some(project) = &request.project else {
        return Ok(());
    };
    let names: Vec<String> = applications
        .list_applications(project)?
        .into_iter()
        .map(|a| a.name)
        .collect();
    if names.len() == 1 {
        output::success(&format!("Found the app: {}", output::user_input(&names[0])));
        request.app = Some(names[0].clone());
        return Ok(());
    }
    let app = prompter.select("Which app", "The app this database belongs to.", &names)?;
    request.app = Some(app);
    Ok(())
}

fn ask_db_name(request: &mut DatabaseCreateRequest, prompter: &dyn Prompter) -> Result<()> {
    if request.db_name.is_some() {
        return Ok(());
    }
    let name = prompter.input("Database name", "The name of the database.")?;
    crate::cli::context::validate_name(&name, "database name")?;
    request.db_name = Some(name);
    Ok(())
}

fn ask_engine(request: &mut DatabaseCreateRequest, prompter: &dyn Prompter) -> Result<()> {
    if request.engine.is_some() {
        return Ok(());
    }
    let options: Vec<String> = ENGINES.iter().map(|e| e.to_string()).collect();
    let engine = prompter.select(
        "Which engine",
        "The type of engine for the database.",
        &options,
    )?;
    request.engine = Some(engine);
    Ok(())
}

fn ask_username(request: &mut DatabaseCreateRequest, prompter: &dyn Prompter) -> Result<()> {
    if request.username.is_some() {
        return Ok(());
    }
    let username = prompter.input("Username", "The name of the master user.")?;
    crate::cli::context::validate_name(&username, "username")?;
    request.username = Some(username);
    Ok(())
}

fn ask_password(request: &mut DatabaseCreateRequest, prompter: &dyn Prompter) -> Result<()> {
    if request.password.is_some() {
        return Ok(());
    }
    let password = prompter.secret("Password", "The password of the master user.")?;
    request.password = Some(password);
    Ok(())
}

impl DatabaseCreateRequest {
    /// Convert into the workflow inputs once every field is settled.
    fn into_complete(self) -> Result<(String, String, DatabaseRequest)> {
        let missing = |field: &str| StratusError::Input {
            detail: format!("no {field} was supplied"),
        };
        Ok((
            self.project.ok_or_else(|| missing("project"))?,
            self.app.ok_or_else(|| missing("application"))?,
            DatabaseRequest {
                database_name: self.db_name.ok_or_else(|| missing("database name"))?,
                engine: self.engine.ok_or_else(|| missing("engine"))?,
                username: self.username.ok_or_else(|| missing("username"))?,
                password: self.password.ok_or_else(|| missing("password"))?,
            },
        ))
    }
}
