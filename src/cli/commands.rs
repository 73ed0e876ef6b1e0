//! Command dispatch for the courseplan CLI

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::{course_details, LoadReport, Shell};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{normalize_identifier, CourseIndex};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "courseplan", &mut io::stdout());
        return Ok(());
    }

    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    let settings = Settings::load(Some(&cwd), cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None => cmd_shell(&container, None),
        Some(Commands::Shell { file }) => cmd_shell(&container, file.as_deref()),
        Some(Commands::List { file }) => cmd_list(&container, file),
        Some(Commands::Show { file, course }) => cmd_show(&container, file, course),
        Some(Commands::Tree { file }) => cmd_tree(&container, file),
        Some(Commands::Config { command }) => cmd_config(&container, &cwd, command),
        Some(Commands::Completion { .. }) => Ok(()),
    }
}

#[instrument(skip(container))]
fn cmd_shell(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let mut settings = Settings::clone(&container.settings);
    if let Some(file) = file {
        settings.default_file = file.to_path_buf();
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(&container.catalog, &settings, stdin.lock(), stdout.lock());
    shell
        .run()
        .map_err(InfraError::session)?;
    Ok(())
}

fn load_catalog(container: &ServiceContainer, file: &Path) -> CliResult<CourseIndex> {
    let (index, report) = container.catalog.load_new(file)?;
    warn_skipped(file, report);
    Ok(index)
}

fn warn_skipped(file: &Path, report: LoadReport) {
    if report.skipped > 0 {
        output::warning(&format!(
            "{}: skipped {} malformed line(s)",
            file.display(),
            report.skipped
        ));
    }
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let index = load_catalog(container, file)?;
    for course in &index {
        output::info(course);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, file: &Path, course: &str) -> CliResult<()> {
    let index = load_catalog(container, file)?;
    let identifier = normalize_identifier(course.trim());
    match index.find(&identifier) {
        Some(found) => {
            output::info(&course_details(found));
            Ok(())
        }
        None => Err(CliError::NotFound(identifier)),
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let index = load_catalog(container, file)?;
    output::info(&index.to_tree_string());
    output::detail(&format!(
        "courses: {}, depth: {}",
        index.len(),
        index.depth()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(container: &ServiceContainer, cwd: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            output::header("Config paths");
            match global_config_path() {
                Some(path) => output::detail(&format!(
                    "global: {} ({})",
                    path.display(),
                    exists_label(container, &path)
                )),
                None => output::detail("global: (no config directory)"),
            }
            let local = local_config_path(cwd);
            output::detail(&format!(
                "local:  {} ({})",
                local.display(),
                exists_label(container, &local)
            ));
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .map_err(|e| InfraError::io(format!("create {}", path.display()), e))?;
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

fn exists_label(container: &ServiceContainer, path: &Path) -> &'static str {
    if container.fs.exists(path) {
        "exists"
    } else {
        "missing"
    }
}
