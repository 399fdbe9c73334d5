//! Settings Module
//!
//! Loads `hostsnap.kdl` and turns it, together with command-line overrides,
//! into the explicit [`RunConfig`] every component receives.
//!
//! ```kdl
//! home "/home/alice"
//! manager "pacman"
//! locations "~/.config" "~/.local/share" "/etc"
//! walk-roots {
//!     "/etc"
//!     "~/.config"
//! }
//! fallback-roots "/etc" "/etc/default"
//! max-depth 3
//! substring-match "token"
//! resolve-mode "first"
//! command-timeout 30
//! output-dir "~/hostsnap"
//! list-command "pacman -Qqe"
//! ```

use crate::constants::common::{DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_MAX_DEPTH, OS_RELEASE_PATH};
use crate::constants::{DEFAULT_FALLBACK_ROOTS, DEFAULT_LOCATIONS, DEFAULT_WALK_ROOTS};
use crate::core::resolver::{ResolveMode, SearchPlan, SubstringMatch};
use crate::core::types::ManagerId;
use crate::error::{HostsnapError, Result};
use crate::packages::runner::CommandSpec;
use crate::project_identity;
use crate::utils::paths;
use kdl::{KdlDocument, KdlNode};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Values read from the settings file. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub home: Option<PathBuf>,
    pub manager: Option<ManagerId>,
    pub locations: Option<Vec<String>>,
    pub walk_roots: Option<Vec<String>>,
    pub fallback_roots: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub substring_match: Option<SubstringMatch>,
    pub resolve_mode: Option<ResolveMode>,
    pub command_timeout: Option<u64>,
    pub output_dir: Option<String>,
    pub list_command: Option<String>,
}

/// Command-line values that take precedence over the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub home: Option<PathBuf>,
    pub manager: Option<ManagerId>,
    pub output_dir: Option<PathBuf>,
    pub substring_match: Option<SubstringMatch>,
    pub max_depth: Option<usize>,
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub plan: SearchPlan,
    pub manager: Option<ManagerId>,
    pub list_command: Option<CommandSpec>,
    pub command_timeout: Duration,
    pub output_dir: PathBuf,
    pub os_release: PathBuf,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path (flag or `HOSTSNAP_CONFIG`) must exist. The default
    /// location is optional; when absent the built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(project_identity::env_key("CONFIG")).map(PathBuf::from);

        if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
            if !path.exists() {
                return Err(HostsnapError::ConfigError(format!(
                    "Config file not found at: {}",
                    path.display()
                )));
            }
            return Self::load_file(&path);
        }

        let default_path = paths::config_file()?;
        if default_path.exists() {
            Self::load_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| HostsnapError::io(path, e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let doc: KdlDocument = content.parse()?;

        let mut settings = Settings::default();

        for node in doc.nodes() {
            match node.name().value() {
                "home" => settings.home = Some(PathBuf::from(first_string(node)?)),
                "manager" => {
                    settings.manager = Some(
                        first_string(node)?
                            .parse()
                            .map_err(HostsnapError::ConfigError)?,
                    )
                }
                "locations" => settings.locations = Some(string_list(node)),
                "walk-roots" => settings.walk_roots = Some(string_list(node)),
                "fallback-roots" => settings.fallback_roots = Some(string_list(node)),
                "max-depth" => settings.max_depth = Some(first_integer(node)? as usize),
                "substring-match" => {
                    settings.substring_match = Some(
                        first_string(node)?
                            .parse()
                            .map_err(HostsnapError::ConfigError)?,
                    )
                }
                "resolve-mode" => {
                    settings.resolve_mode = Some(
                        first_string(node)?
                            .parse()
                            .map_err(HostsnapError::ConfigError)?,
                    )
                }
                "command-timeout" => settings.command_timeout = Some(first_integer(node)?),
                "output-dir" => settings.output_dir = Some(first_string(node)?.to_string()),
                "list-command" => settings.list_command = Some(first_string(node)?.to_string()),
                other => {
                    return Err(HostsnapError::ConfigError(format!(
                        "Unknown setting: '{}'",
                        other
                    )));
                }
            }
        }

        Ok(settings)
    }

    /// Merge with command-line overrides and expand every path
    pub fn into_run_config(self, overrides: Overrides) -> Result<RunConfig> {
        let home = match overrides.home.or(self.home) {
            Some(home) => home,
            None => paths::home_dir()?,
        };

        let expand_all = |custom: Option<Vec<String>>, defaults: &[&str]| -> Result<Vec<PathBuf>> {
            let raw: Vec<String> =
                custom.unwrap_or_else(|| defaults.iter().map(|s| s.to_string()).collect());
            raw.iter()
                .map(|p| paths::expand_home(Path::new(p), &home))
                .collect()
        };

        let plan = SearchPlan {
            locations: expand_all(self.locations, DEFAULT_LOCATIONS)?,
            walk_roots: expand_all(self.walk_roots, DEFAULT_WALK_ROOTS)?,
            fallback_roots: expand_all(self.fallback_roots, DEFAULT_FALLBACK_ROOTS)?,
            max_depth: overrides
                .max_depth
                .or(self.max_depth)
                .unwrap_or(DEFAULT_MAX_DEPTH),
            substring_match: overrides
                .substring_match
                .or(self.substring_match)
                .unwrap_or_default(),
            mode: self.resolve_mode.unwrap_or_default(),
            home: home.clone(),
        };

        let output_dir = match (overrides.output_dir, self.output_dir) {
            (Some(dir), _) => dir,
            (None, Some(dir)) => paths::expand_home(Path::new(&dir), &home)?,
            (None, None) => home.join(project_identity::DEFAULT_OUTPUT_DIR_NAME),
        };
        // Relative output is anchored at the working directory
        let output_dir =
            std::path::absolute(&output_dir).map_err(|e| HostsnapError::io(&output_dir, e))?;

        let list_command = self
            .list_command
            .as_deref()
            .map(CommandSpec::parse)
            .transpose()?;

        let timeout_secs = self.command_timeout.unwrap_or(DEFAULT_COMMAND_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(HostsnapError::ConfigError(
                "command-timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(RunConfig {
            plan,
            manager: overrides.manager.or(self.manager),
            list_command,
            command_timeout: Duration::from_secs(timeout_secs),
            output_dir,
            os_release: PathBuf::from(OS_RELEASE_PATH),
        })
    }
}

fn first_string(node: &KdlNode) -> Result<&str> {
    node.entries()
        .first()
        .and_then(|entry| entry.value().as_string())
        .ok_or_else(|| {
            HostsnapError::ConfigError(format!(
                "'{}' expects a string value",
                node.name().value()
            ))
        })
}

fn first_integer(node: &KdlNode) -> Result<u64> {
    node.entries()
        .first()
        .and_then(|entry| entry.value().as_integer())
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| {
            HostsnapError::ConfigError(format!(
                "'{}' expects a non-negative integer",
                node.name().value()
            ))
        })
}

/// Collect string arguments and child node names:
/// `roots "/etc" "/var"` and `roots { "/etc"; "/var" }` are equivalent.
fn string_list(node: &KdlNode) -> Vec<String> {
    let mut values: Vec<String> = node
        .entries()
        .iter()
        .filter_map(|entry| entry.value().as_string())
        .map(str::to_string)
        .collect();

    if let Some(children) = node.children() {
        values.extend(children.nodes().iter().map(|child| child.name().value().to_string()));
    }

    values
}
