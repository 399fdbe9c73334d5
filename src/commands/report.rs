use crate::commands::pipeline::{self, RunContext, SoftFailures, Stage};
use crate::config::RunConfig;
use crate::core::types::{AppMap, SystemInventory};
use crate::error::Result;
use crate::packages::runner::SystemRunner;
use crate::project_identity;
use crate::report::{self, Artifact};
use crate::ui;
use crate::utils::cancel::CancelToken;
use colored::Colorize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub format: ReportFormat,
    /// Also write the JSON artifacts (nothing is copied)
    pub write: bool,
}

/// Dry run: build the inventory and print it.
pub fn run(config: &RunConfig, cancel: CancelToken, options: ReportOptions) -> Result<SoftFailures> {
    // Machine formats own stdout
    if options.format != ReportFormat::Table {
        ui::set_quiet(true);
    }

    let runner = SystemRunner::new(config.command_timeout, cancel.clone());
    let mut ctx = RunContext::new(config, &runner, cancel);
    let mut failures = SoftFailures::new();

    ui::header(&format!("{} inventory", project_identity::DISPLAY_NAME));
    let inventory = pipeline::collect_inventory(&mut ctx, &mut failures)?;

    let rendered = match options.format {
        ReportFormat::Table => render_table(&inventory),
        ReportFormat::Json => Artifact::System.render(&inventory)?,
        ReportFormat::Yaml => serde_yml::to_string(&inventory)?,
    };
    println!("{}", rendered.trim_end());

    if options.write {
        for artifact in Artifact::ALL {
            if let Some(path) = failures.absorb(
                Stage::Write,
                report::write_artifact(&config.output_dir, artifact, &inventory),
            )? {
                ui::success(&format!("Wrote {}", path.display()));
            }
        }
    }

    Ok(failures)
}

/// Human-readable summary of the inventory
pub fn render_table(inventory: &SystemInventory) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", "System".bold().underline());
    let _ = writeln!(out, "  {:<16}{}", "OS", inventory.os);
    let _ = writeln!(
        out,
        "  {:<16}{}",
        "Hostname",
        inventory.hostname.as_deref().unwrap_or("-")
    );
    let _ = writeln!(out, "  {:<16}{}", "Package manager", inventory.pkg_manager);
    let _ = writeln!(out, "  {:<16}{}", "Generated", inventory.generated_at.to_rfc3339());

    let _ = writeln!(
        out,
        "\n{} ({})",
        "Packages".bold().underline(),
        inventory.packages.len()
    );
    let width = inventory
        .packages
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(0);

    for package in &inventory.packages {
        let paths = inventory.configs.get(package).map(|r| r.paths()).unwrap_or(&[]);
        if paths.is_empty() {
            let _ = writeln!(out, "  {:<width$}  {}", package, "-".dimmed());
            continue;
        }
        for (i, path) in paths.iter().enumerate() {
            let name = if i == 0 { package.as_str() } else { "" };
            let _ = writeln!(out, "  {:<width$}  {}", name, path.display().to_string().green());
        }
    }

    write_apps(&mut out, "Snaps", &inventory.snaps);
    write_apps(&mut out, "Flatpaks", &inventory.flatpaks);

    out
}

fn write_apps(out: &mut String, title: &str, apps: &AppMap) {
    let _ = writeln!(out, "\n{} ({})", title.bold().underline(), apps.len());
    for name in apps.keys() {
        let _ = writeln!(out, "  {}", name);
    }
}
