use anyhow::Context;
use reproai_pipeline::{Pipeline, RunRequest};

use crate::bootstrap;
use crate::cli::{GlobalFlags, RunArgs};
use crate::progress::Progress;

/// Handle `reproai run`.
pub async fn handle(args: &RunArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = bootstrap::load_config(args)?;
    let pipeline = Pipeline::new(&config).context("failed to initialise pipeline")?;

    let request = RunRequest {
        paper_id: args.paper_id.clone(),
        github_id: args.github_id.clone(),
        json_out: args.json_out.clone(),
        html_out: args.html_out.clone(),
    };

    let progress = Progress::spinner("Building reproducibility report", *flags);
    let outcome = pipeline.run(&request).await;
    progress.finish_clear();
    let outcome = outcome?;

    println!(
        "Report written to {} and {}",
        outcome.paths.json.display(),
        outcome.paths.html.display()
    );

    if flags.verbose {
        for entry in &outcome.report.unavailable {
            eprintln!("  unavailable: {}: {}", entry.section, entry.reason);
        }
    }
    Ok(())
}
