//! Command implementations

pub mod completions;
pub mod explain;
pub mod generate;
pub mod plan;
pub mod verify;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use miette::Diagnostic;

use crate::cli::ModelArgs;
use sigwire::util::config::{global_config_path, load_config, project_config_path};
use sigwire::util::Config;
use sigwire::core::ModelError;
use sigwire::{LanguageTarget, Model, ModelQuery, ShapeId};

/// A loaded model plus the selection the command works on.
pub struct Session {
    pub config: Config,
    pub model: Model,
    pub services: Vec<ShapeId>,
    pub targets: Vec<LanguageTarget>,
}

/// Load the merged global and project config for the current directory.
pub fn current_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let global = global_config_path();
    Ok(load_config(global.as_deref(), &project_config_path(&cwd)))
}

/// Load the model from flags, falling back to configured paths.
pub fn load_model(config: &Config, models: &[PathBuf]) -> Result<Model> {
    let paths = if models.is_empty() {
        config.model.paths.clone()
    } else {
        models.to_vec()
    };

    if paths.is_empty() {
        bail!(
            "no model given\n\
             help: Pass `--model <PATH>` or set `model.paths` in .sigwire/config.toml"
        );
    }

    let model = Model::load(&paths).map_err(with_help)?;
    tracing::debug!("Loaded {} shapes from {} path(s)", model.len(), paths.len());
    Ok(model)
}

/// Resolve service names against the model. No names selects every service.
pub fn select_services(model: &Model, names: &[String]) -> Result<Vec<ShapeId>> {
    if names.is_empty() {
        let services = model.services();
        if services.is_empty() {
            bail!("model contains no services");
        }
        return Ok(services);
    }

    names
        .iter()
        .map(|name| model.find_service(name).map_err(with_help))
        .collect()
}

impl Session {
    /// Build a session from shared model arguments and config.
    pub fn new(args: &ModelArgs) -> Result<Self> {
        let config = current_config()?;
        let model = load_model(&config, &args.models)?;

        let names = if args.services.is_empty() {
            &config.model.services
        } else {
            &args.services
        };
        let services = select_services(&model, names)?;

        let targets = if args.targets.is_empty() {
            config.targets()
        } else {
            args.targets.clone()
        };

        Ok(Session {
            config,
            model,
            services,
            targets,
        })
    }
}

/// Flatten a model error into a message with its causes and help text.
fn with_help(err: ModelError) -> anyhow::Error {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    if let Some(help) = err.help() {
        message.push_str(&format!("\nhelp: {}", help));
    }
    anyhow!(message)
}
