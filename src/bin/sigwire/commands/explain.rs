//! `sigwire explain` command

use anyhow::Result;

use crate::cli::ExplainArgs;
use crate::commands::{current_config, load_model, select_services};
use sigwire::auth::LanguageTarget;
use sigwire::ops::plan_service;

pub fn execute(args: ExplainArgs) -> Result<()> {
    let config = current_config()?;
    let model = load_model(&config, &args.models)?;
    let service = select_services(&model, &[args.service])?.remove(0);

    let plan = plan_service(&model, &service, &LanguageTarget::ALL);

    println!("{}", plan.service);
    println!("  sdk id:        {}", plan.sdk_id.as_deref().unwrap_or("-"));
    println!("  signed:        {}", yes_no(plan.signed));
    println!("  token service: {}", yes_no(plan.token_service));
    println!("  operations:    {}", plan.operations.len());

    println!();
    println!("Rules:");
    for outcome in &plan.rules {
        let status = if outcome.fired() { "fired" } else { "skipped" };
        println!("  [{:<7}] {:<30} {}", status, outcome.rule, outcome.description);
    }

    if !plan.operations.is_empty() {
        println!();
        println!("Operations:");
        for op in &plan.operations {
            let mut note = if op.signed { "signed" } else { "unsigned" }.to_string();
            if op.optional_auth {
                note.push_str(" (optional auth)");
            }
            println!("  {:<40} {}", op.operation.name(), note);
        }
    }

    if !plan.runtime_config.is_empty() {
        println!();
        println!("Runtime config:");
        for exprs in plan.runtime_config.values() {
            for expr in exprs.values() {
                println!("  {:<14} {}", expr.target.as_str(), expr.fragment);
            }
        }
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
