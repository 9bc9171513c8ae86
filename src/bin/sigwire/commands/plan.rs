//! `sigwire plan` command

use anyhow::{Context, Result};

use crate::cli::PlanArgs;
use crate::commands::Session;
use sigwire::auth::{Applicability, PluginDescriptor};
use sigwire::ops::plan_services;
use sigwire::AuthPlan;

pub fn execute(args: PlanArgs) -> Result<()> {
    let session = Session::new(&args.model)?;
    let plans = plan_services(&session.model, &session.services, &session.targets);

    if args.json {
        let json = serde_json::to_string_pretty(&plans).context("failed to serialize plans")?;
        println!("{}", json);
        return Ok(());
    }

    for (i, plan) in plans.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_plan(plan);
    }

    Ok(())
}

fn print_plan(plan: &AuthPlan) {
    match &plan.sdk_id {
        Some(sdk_id) => println!("{} ({})", plan.service, sdk_id),
        None => println!("{}", plan.service),
    }

    let mut flags = vec![if plan.signed { "signed" } else { "unsigned" }];
    if plan.token_service {
        flags.push("token service");
    }
    println!("  {}", flags.join(", "));

    if plan.is_empty() {
        println!("  no auth wiring");
        return;
    }

    if !plan.plugins.is_empty() {
        println!("  plugins:");
        for plugin in &plan.plugins {
            println!(
                "    {:<24} {:<30} {}",
                plugin.kind.as_str(),
                plugin.dependency.package,
                describe_plugin(plugin, plan.operations.len())
            );
        }
    }

    if !plan.runtime_config.is_empty() {
        println!("  runtime config:");
        for (target, exprs) in &plan.runtime_config {
            let fields: Vec<_> = exprs.keys().copied().collect();
            println!(
                "    {:<14} {:<26} {}",
                target.as_str(),
                target.runtime_config_file(),
                fields.join(", ")
            );
        }
    }

    if !plan.config_fields.is_empty() {
        let fields: Vec<_> = plan.config_fields.iter().map(|f| f.name).collect();
        println!("  config fields: {}", fields.join(", "));
    }

    if !plan.additional_files.is_empty() {
        let files: Vec<_> = plan.additional_files.iter().map(|f| f.path).collect();
        println!("  support files: {}", files.join(", "));
    }
}

fn describe_plugin(plugin: &PluginDescriptor, total_operations: usize) -> String {
    let function = plugin
        .resolve_function()
        .or_else(|| plugin.plugin_function())
        .unwrap_or_default();

    let mut description = if plugin.additional_resolve_parameters.is_empty() {
        function
    } else {
        format!(
            "{}({})",
            function,
            plugin.additional_resolve_parameters.join(", ")
        )
    };

    if let Applicability::Operations(ops) = &plugin.applicability {
        description.push_str(&format!(" ({} of {} operations)", ops.len(), total_operations));
    }

    description
}
