//! Inventory pipeline shared by `backup` and `report`.
//!
//! detect → enumerate → resolve → app stores, strictly in sequence.
//! Best-effort stages report trouble through [`SoftFailures`] and the run
//! keeps going; only cancellation and setup errors abort.

use crate::config::RunConfig;
use crate::core::resolver::{ConfigResolver, Progress};
use crate::core::types::{AppMap, ManagerId, SystemInventory};
use crate::error::{HostsnapError, Result};
use crate::packages::appstore::AppStore;
use crate::packages::registry::BackendRegistry;
use crate::packages::runner::CommandRunner;
use crate::packages::{detect, enumerate};
use crate::ui;
use crate::ui::progress::ProgressBar;
use crate::utils::cancel::CancelToken;
use crate::utils::distro;
use chrono::Utc;
use std::fmt;

/// Pipeline stage a soft failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Enumerate,
    Snaps,
    Flatpaks,
    Backup,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Enumerate => "enumerate",
            Self::Snaps => "snaps",
            Self::Flatpaks => "flatpaks",
            Self::Backup => "backup",
            Self::Write => "write",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftFailure {
    pub stage: Stage,
    pub message: String,
}

/// Problems that did not stop the run but make it exit with status 2
#[derive(Debug, Default)]
pub struct SoftFailures {
    entries: Vec<SoftFailure>,
}

impl SoftFailures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and remember a failure
    pub fn record(&mut self, stage: Stage, message: impl Into<String>) {
        let message = message.into();
        ui::warning(&format!("[{}] {}", stage, message));
        self.entries.push(SoftFailure { stage, message });
    }

    /// Turn an `Err` into a recorded failure. `Interrupted` still aborts.
    pub fn absorb<T>(&mut self, stage: Stage, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(HostsnapError::Interrupted) => Err(HostsnapError::Interrupted),
            Err(e) => {
                self.record(stage, e.to_string());
                Ok(None)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoftFailure> {
        self.entries.iter()
    }
}

/// Everything a run needs, passed explicitly instead of read from the process
pub struct RunContext<'a> {
    pub config: &'a RunConfig,
    pub runner: &'a dyn CommandRunner,
    pub registry: BackendRegistry,
    pub cancel: CancelToken,
}

impl<'a> RunContext<'a> {
    pub fn new(config: &'a RunConfig, runner: &'a dyn CommandRunner, cancel: CancelToken) -> Self {
        Self {
            config,
            runner,
            registry: BackendRegistry::with_defaults(),
            cancel,
        }
    }
}

/// Build the inventory for this host
pub fn collect_inventory(
    ctx: &mut RunContext<'_>,
    failures: &mut SoftFailures,
) -> Result<SystemInventory> {
    let config = ctx.config;

    let os = distro::detect_os_id(&config.os_release, ctx.runner);
    ctx.cancel.check()?;

    let manager = match config.manager {
        Some(id) => {
            ui::verbose(&format!("Package manager set by configuration: {}", id));
            id
        }
        None => detect::detect(&ctx.registry, ctx.runner),
    };
    ctx.cancel.check()?;

    ui::keyval("OS", &os);
    ui::keyval("Package manager", manager.as_str());

    if let Some(list) = &config.list_command {
        ui::verbose(&format!("Listing packages with: {}", list.display()));
        ctx.registry.override_list_command(manager, list.clone());
    }

    let packages = failures
        .absorb(
            Stage::Enumerate,
            enumerate::list_installed(&ctx.registry, manager, ctx.runner),
        )?
        .unwrap_or_default();

    if packages.is_empty() && manager == ManagerId::Unknown && config.list_command.is_none() {
        ui::warning("No supported package manager found; package list is empty");
    }
    ui::keyval("Packages", &packages.len().to_string());

    let resolver = ConfigResolver::new(&config.plan, ctx.cancel.clone());
    let mut bar = ProgressBar::new(packages.len(), "Resolving configs");
    let configs = resolver.resolve(&packages, |progress| {
        bar.set(progress.done);
        log_resolution(&progress);
    })?;
    bar.finish();

    let found = configs.values().filter(|r| r.is_found()).count();
    ui::keyval("Configs found", &format!("{}/{}", found, configs.len()));

    let snaps = collect_store(AppStore::Snap, Stage::Snaps, ctx.runner, failures)?;
    ctx.cancel.check()?;
    let flatpaks = collect_store(AppStore::Flatpak, Stage::Flatpaks, ctx.runner, failures)?;

    Ok(SystemInventory {
        os,
        hostname: hostname::get().ok().and_then(|h| h.into_string().ok()),
        pkg_manager: manager,
        packages,
        configs,
        snaps,
        flatpaks,
        generated_at: Utc::now(),
    })
}

fn log_resolution(progress: &Progress<'_>) {
    if !ui::is_verbose() {
        return;
    }

    match progress.matched {
        Some(m) => {
            let paths: Vec<String> = m.paths.iter().map(|p| p.display().to_string()).collect();
            ui::verbose(&format!(
                "{} -> {} ({})",
                progress.package,
                paths.join(", "),
                m.strategy
            ));
        }
        None => ui::verbose(&format!("{} -> not found", progress.package)),
    }
}

fn collect_store(
    store: AppStore,
    stage: Stage,
    runner: &dyn CommandRunner,
    failures: &mut SoftFailures,
) -> Result<AppMap> {
    match failures.absorb(stage, store.collect(runner))? {
        Some(Some(apps)) => {
            ui::keyval(&format!("{} apps", store.program()), &apps.len().to_string());
            Ok(apps)
        }
        Some(None) => {
            ui::verbose(&format!("{} is not installed", store.program()));
            Ok(AppMap::new())
        }
        None => Ok(AppMap::new()),
    }
}
