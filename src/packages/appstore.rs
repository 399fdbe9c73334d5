//! Snap and Flatpak inventory.
//!
//! These stores sit beside the system package manager and are collected
//! independently of config resolution. Only application names are kept;
//! every name maps to [`AppStatus::Installed`].

use crate::core::types::{AppMap, AppStatus};
use crate::error::{HostsnapError, Result};
use crate::packages::runner::{CommandRunner, CommandSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStore {
    Snap,
    Flatpak,
}

impl AppStore {
    pub fn program(&self) -> &'static str {
        match self {
            Self::Snap => "snap",
            Self::Flatpak => "flatpak",
        }
    }

    fn list_command(&self) -> CommandSpec {
        match self {
            Self::Snap => CommandSpec::new("snap", &["list"]),
            Self::Flatpak => CommandSpec::new("flatpak", &["list", "--app", "--columns=application"]),
        }
    }

    /// First word of the header row, when the store prints one
    fn header(&self) -> &'static str {
        match self {
            Self::Snap => "Name",
            Self::Flatpak => "Application",
        }
    }

    /// Collect installed application names.
    ///
    /// Returns `Ok(None)` when the store's binary is not installed, which is
    /// an ordinary absence rather than a failure.
    pub fn collect(&self, runner: &dyn CommandRunner) -> Result<Option<AppMap>> {
        if !runner.is_installed(self.program()) {
            return Ok(None);
        }

        let spec = self.list_command();
        let output = runner.run(&spec)?;
        if !output.success {
            return Err(HostsnapError::SystemCommandFailed {
                command: spec.display(),
                reason: output.stderr.trim().to_string(),
            });
        }

        Ok(Some(parse_app_list(&output.stdout, self.header())))
    }
}

/// Parse listing output: skip blank and header rows, keep the first word.
pub fn parse_app_list(output: &str, header: &str) -> AppMap {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter(|name| *name != header)
        .map(|name| (name.to_string(), AppStatus::Installed))
        .collect()
}
