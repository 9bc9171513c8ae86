//! `sigwire generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::Session;
use sigwire::ops::{generate, GenerateOptions};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let session = Session::new(&args.model)?;

    let opts = GenerateOptions {
        out_dir: args.out.unwrap_or_else(|| session.config.out_dir()),
        services: session.services.clone(),
        targets: session.targets.clone(),
        sdk_version: args
            .sdk_version
            .unwrap_or_else(|| session.config.sdk_version().to_string()),
    };

    let result = generate(&session.model, &opts)?;

    for plan in &result.plans {
        let files = result.files_for(plan, &opts.out_dir);
        println!(
            "{:>12} {} ({} file{})",
            "Generated",
            plan.service,
            files.len(),
            if files.len() == 1 { "" } else { "s" }
        );
    }
    println!(
        "{:>12} {} file(s) in {}",
        "Finished",
        result.files.len(),
        opts.out_dir.display()
    );

    Ok(())
}
