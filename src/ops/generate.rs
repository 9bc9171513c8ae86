//! Implementation of `sigwire generate`.
//!
//! Plans each requested service and renders the plan under
//! `<out>/<lowercased service name>/`:
//!
//! - `runtimeConfig*.ts`: default credential provider initializer, one per
//!   target that produced output
//! - `authConfig.ts`: auth fields of the client input config interface
//! - support files of the token-issuing service, copied verbatim
//! - `index.ts`: package-level export statements
//! - `package.dependencies.json`: packages the generated code needs
//! - `auth-plan.json`: the full plan

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::auth::{BootstrapExpression, ConfigInterfaceField, LanguageTarget};
use crate::core::{ModelQuery, ShapeId};
use crate::emit::{DependencyKind, TypeScriptWriter};
use crate::ops::plan::{plan_services, AuthPlan};
use crate::util::fs::write_string;

/// Serialized plan file name.
pub const PLAN_FILE: &str = "auth-plan.json";

/// Config interface module name.
pub const AUTH_CONFIG_FILE: &str = "authConfig.ts";

/// Package index module name.
pub const INDEX_FILE: &str = "index.ts";

/// Dependency manifest file name.
pub const DEPENDENCIES_FILE: &str = "package.dependencies.json";

/// Options for generating auth sources.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Output root
    pub out_dir: PathBuf,

    /// Services to generate
    pub services: Vec<ShapeId>,

    /// Runtime targets to generate
    pub targets: Vec<LanguageTarget>,

    /// Version range written for each dependency
    pub sdk_version: String,
}

/// Result of a generate run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Plans, ordered by service id
    pub plans: Vec<AuthPlan>,

    /// Every file written
    pub files: Vec<PathBuf>,
}

impl GenerateResult {
    /// Get the files written for one service.
    pub fn files_for(&self, plan: &AuthPlan, out_dir: &Path) -> Vec<&PathBuf> {
        let dir = out_dir.join(plan.dir_name());
        self.files.iter().filter(|f| f.starts_with(&dir)).collect()
    }
}

/// Plan and write auth sources for the requested services.
pub fn generate<Q: ModelQuery + Sync + ?Sized>(
    query: &Q,
    opts: &GenerateOptions,
) -> Result<GenerateResult> {
    if opts.services.is_empty() {
        bail!("no services to generate");
    }

    let plans = plan_services(query, &opts.services, &opts.targets);

    let mut seen: HashMap<String, &ShapeId> = HashMap::new();
    for plan in &plans {
        if let Some(other) = seen.insert(plan.dir_name(), &plan.service) {
            bail!(
                "services `{}` and `{}` would both be generated into `{}`",
                other,
                plan.service,
                opts.out_dir.join(plan.dir_name()).display()
            );
        }
    }

    let mut files = Vec::new();
    for plan in &plans {
        let dir = opts.out_dir.join(plan.dir_name());
        let written = write_plan(plan, &dir, &opts.sdk_version)
            .with_context(|| format!("failed to generate sources for {}", plan.service))?;
        files.extend(written);
    }

    Ok(GenerateResult { plans, files })
}

/// Write every output of one plan into `dir`.
pub fn write_plan(plan: &AuthPlan, dir: &Path, sdk_version: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut emit = |name: &str, contents: &str| -> Result<()> {
        let path = dir.join(name);
        write_string(&path, contents)?;
        files.push(path);
        Ok(())
    };

    for (target, exprs) in &plan.runtime_config {
        emit(
            target.runtime_config_file(),
            &render_runtime_config(exprs).render(),
        )?;
    }

    if !plan.config_fields.is_empty() {
        emit(AUTH_CONFIG_FILE, &render_auth_config(&plan.config_fields).render())?;
    }

    for file in &plan.additional_files {
        emit(file.path, file.contents)?;
    }

    if !plan.additional_exports.is_empty() {
        let mut index = plan.additional_exports.join("\n");
        index.push('\n');
        emit(INDEX_FILE, &index)?;
    }

    if !plan.dependencies().is_empty() {
        emit(DEPENDENCIES_FILE, &render_dependencies(plan, sdk_version)?)?;
    }

    let json = serde_json::to_string_pretty(plan)
        .with_context(|| format!("failed to serialize plan for {}", plan.service))?;
    emit(PLAN_FILE, &(json + "\n"))?;

    Ok(files)
}

/// Render the runtime config initializers of one target as a module.
pub fn render_runtime_config(exprs: &BTreeMap<&'static str, BootstrapExpression>) -> TypeScriptWriter {
    let mut writer = TypeScriptWriter::new();
    writer.write("export const authRuntimeConfig = {").indent();
    for expr in exprs.values() {
        expr.write_to(&mut writer);
    }
    writer.dedent().write("};");
    writer
}

/// Render the auth fields of the client input config interface.
pub fn render_auth_config(fields: &[ConfigInterfaceField]) -> TypeScriptWriter {
    let mut writer = TypeScriptWriter::new();
    writer.write("export interface AuthInputConfig {").indent();
    for field in fields {
        field.write_to(&mut writer);
    }
    writer.dedent().write("}");
    writer
}

fn render_dependencies(plan: &AuthPlan, sdk_version: &str) -> Result<String> {
    let mut sections: BTreeMap<DependencyKind, BTreeMap<&str, &str>> = BTreeMap::new();
    for dep in plan.dependencies() {
        sections
            .entry(dep.kind)
            .or_default()
            .insert(dep.package, sdk_version);
    }
    let json = serde_json::to_string_pretty(&sections)
        .context("failed to serialize dependency manifest")?;
    Ok(json + "\n")
}
