use crate::commands::pipeline::{self, RunContext, SoftFailures, Stage};
use crate::config::RunConfig;
use crate::constants::BACKUP_ARTIFACT;
use crate::error::Result;
use crate::packages::runner::SystemRunner;
use crate::project_identity;
use crate::report::{self, Artifact};
use crate::ui;
use crate::utils::cancel::CancelToken;

/// Full run: inventory, copy every resolved config, write all artifacts.
pub fn run(config: &RunConfig, cancel: CancelToken) -> Result<SoftFailures> {
    ui::header(&format!("{} inventory", project_identity::DISPLAY_NAME));

    let runner = SystemRunner::new(config.command_timeout, cancel.clone());
    let mut ctx = RunContext::new(config, &runner, cancel.clone());
    let mut failures = SoftFailures::new();

    let inventory = pipeline::collect_inventory(&mut ctx, &mut failures)?;

    ui::header("Backup");
    ui::keyval("Destination", &config.output_dir.display().to_string());

    let backup = report::backup_configs(&inventory.configs, &config.output_dir, &cancel)?;
    for failure in &backup.failed {
        failures.record(
            Stage::Backup,
            format!("{} ({}): {}", failure.source.display(), failure.package, failure.reason),
        );
    }

    for artifact in Artifact::ALL {
        if let Some(path) = failures.absorb(
            Stage::Write,
            report::write_artifact(&config.output_dir, artifact, &inventory),
        )? {
            ui::verbose(&format!("Wrote {}", path.display()));
        }
    }
    failures.absorb(
        Stage::Write,
        report::write_json(&config.output_dir, BACKUP_ARTIFACT, &backup),
    )?;

    ui::separator();
    ui::success(&format!(
        "Backed up {} path(s) for {} package(s) to {}",
        backup.copied.len(),
        inventory.configs.values().filter(|r| r.is_found()).count(),
        config.output_dir.display()
    ));
    if !failures.is_empty() {
        ui::warning(&format!("Completed with {} problem(s)", failures.len()));
    }

    Ok(failures)
}
