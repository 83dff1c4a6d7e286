use crate::adapters::directory::toml_directory::TomlDirectory;
use crate::adapters::gateway::local_gateway::LocalGateway;
use crate::adapters::prompt::dialoguer_prompt::DialoguerPrompter;
use crate::adapters::store::yaml_manifest_store::YamlManifestStore;
use crate::cli::output;
use crate::core::errors::{Result, StratusError};
use crate::core::models::run_record::RunAction;
use crate::core::services::secret_provisioner::SecretProvisioner;
use crate::core::traits::directory::{ApplicationReader, EnvironmentReader, ProjectReader};
use crate::core::traits::prompter::Prompter;

/// Fields collected for `stratus secret add`. The environment selector
/// is flag-only: leaving it out stores a base-level secret on purpose,
/// so it is never prompted for.
#[derive(Debug, Default)]
pub struct SecretAddRequest {
    pub project: Option<String>,
    pub app: Option<String>,
    pub env: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Execute the `stratus secret add` command.
///
/// Stores the value under a key derived from project, application and
/// secret name (environment-suffixed when scoped), then saves the
/// reference to the application's manifest.
pub fn execute(mut request: SecretAddRequest, verbose: bool) -> Result<()> {
    let stratus_dir = crate::cli::context::stratus_dir();
    let directory = TomlDirectory::load(&stratus_dir)?;

    validate(&request, &directory)?;
    ask(&mut request, &directory, &DialoguerPrompter)?;
    let (project, app, env, name, value) = request.into_complete()?;

    // Selectors may have been supplied before the project was known;
    // check them again now that every field is settled.
    validate_selectors(&project, &app, env.as_deref(), &directory)?;

    let store = YamlManifestStore::new(crate::cli::context::workspace_dir().to_path_buf());
    let gateway = LocalGateway::new(stratus_dir.join("state"));
    let provisioner = SecretProvisioner {
        secrets: &gateway,
        store: &store,
    };

    let key = provisioner.add(&project, &app, env.as_deref(), &name, &value)?;

    if verbose {
        output::success(&format!("Stored under {key}"));
    }
    output::success(&format!(
        "Created/updated {} in {} under project {}.",
        output::user_input(&name),
        output::resource(&app),
        output::resource(&project)
    ));
    output::success(&format!(
        "Saved the secret {} to the manifest.",
        output::user_input(&name)
    ));

    super::history_helpers::record_run(
        RunAction::SecretAdd,
        &project,
        &app,
        &name,
        env.iter().cloned().collect(),
        None,
    );

    Ok(())
}

/// Check the settled project/application/environment triple. Runs after
/// prompting, so it also covers selectors supplied without a project.
fn validate_selectors(
    project: &str,
    app: &str,
    env: Option<&str>,
    directory: &TomlDirectory,
) -> Result<()> {
    directory.get_application(project, app)?;
    if let Some(env) = env {
        directory.get_environment(project, env)?;
    }
    Ok(())
}

/// Fail fast on selectors that do not exist. Only supplied fields are
/// checked here.
fn validate(request: &SecretAddRequest, directory: &TomlDirectory) -> Result<()> {
    if let Some(project) = &request.project {
        directory.get_project(project)?;
        if let Some(app) = &request.app {
            directory.get_application(project, app)?;
        }
        if let Some(env) = &request.env {
            directory.get_environment(project, env)?;
        }
    }
    if let Some(name) = &request.name {
        crate::cli::context::validate_secret_name(name)?;
    }
    Ok(())
}

/// Collect required fields that were not passed as flags; each step
/// short-circuits when its field is already set.
fn ask(
    request: &mut SecretAddRequest,
    directory: &TomlDirectory,
    prompter: &dyn Prompter,
) -> Result<()> {
    ask_project(request, directory, prompter)?;
    ask_app(request, directory, prompter)?;
    ask_name(request, prompter)?;
    ask_value(request, prompter)
}

fn ask_project(
    request: &mut SecretAddRequest,
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
    request: &mut SecretAddRequest,
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
    let app = prompter.select("Which app", "The app this secret belongs to.", &names)?;
    request.app = Some(app);
    Ok(())
}

fn ask_name(request: &mut SecretAddRequest, prompter: &dyn Prompter) -> Result<()> {
    if request.name.is_some() {
        return Ok(());
    }
    let name = prompter.input(
        "Secret name (e.g. MY_SECRET)",
        "The name that will uniquely identify your secret within your app.",
    )?;
    crate::cli::context::validate_secret_name(&name)?;
    request.name = Some(name);
    Ok(())
}

fn ask_value(request: &mut SecretAddRequest, prompter: &dyn Prompter) -> Result<()> {
    if request.value.is_some() {
        return Ok(());
    }
    let value = prompter.secret(
        "Value to store",
        "The value to be stored and accessed by the app.",
    )?;
    request.value = Some(value);
    Ok(())
}

type CompleteSecretAdd = (String, String, Option<String>, String, String);

impl SecretAddRequest {
    /// Convert into the workflow inputs once every field is settled.
    fn into_complete(self) -> Result<CompleteSecretAdd> {
        let missing = |field: &str| StratusError::Input {
            detail: format!("no {field} was supplied"),
        };
        Ok((
            self.project.ok_or_else(|| missing("project"))?,
            self.app.ok_or_else(|| missing("application"))?,
            self.env,
            self.name.ok_or_else(|| missing("secret name"))?,
            self.value.ok_or_else(|| missing("secret value"))?,
        ))
    }
}
