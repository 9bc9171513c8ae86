//! `sigwire verify` command

use anyhow::{bail, Context, Result};

use crate::cli::VerifyArgs;
use sigwire::ops::{format_report, verify_assets};

pub fn execute(args: VerifyArgs) -> Result<()> {
    let report = verify_assets(&args.dir)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        println!("Verifying {}", report.dir.display());
        print!("{}", format_report(&report));
    }

    if !report.passed() {
        bail!(
            "{} support file(s) differ from the bundled templates\n\
             help: Re-run `sigwire generate` to restore them",
            report.failures().count()
        );
    }

    Ok(())
}
