//! # Package Manager Registry
//!
//! Each supported manager is described by a [`ManagerSpec`]: the command
//! that proves it is installed, the command that lists user-installed
//! packages, and the format of that listing. [`SpecManager`] turns a spec
//! into a [`PackageManager`].
//!
//! ## Adding a New Manager
//!
//! 1. Add a `ManagerId::<Name>` variant to `core/types.rs` (its position in
//!    `DETECTION_ORDER` decides probing priority)
//! 2. Add its spec to [`builtin_spec`]
//!
//! Nothing in the resolver needs to change.

use crate::core::types::ManagerId;
use crate::error::{HostsnapError, Result};
use crate::packages::parsers::ListFormat;
use crate::packages::runner::{CommandRunner, CommandSpec};
use crate::packages::traits::PackageManager;
use std::collections::HashMap;

/// Command templates for one package manager
#[derive(Debug, Clone)]
pub struct ManagerSpec {
    pub id: ManagerId,
    pub probe: CommandSpec,
    pub list: CommandSpec,
    pub format: ListFormat,
}

/// Built-in command table. `Unknown` has no spec.
pub fn builtin_spec(id: ManagerId) -> Option<ManagerSpec> {
    let (probe, list, format) = match id {
        ManagerId::Apt => (
            CommandSpec::new("apt", &["--version"]),
            CommandSpec::new("apt-mark", &["showmanual"]),
            ListFormat::Lines,
        ),
        ManagerId::Dnf => (
            CommandSpec::new("dnf", &["--version"]),
            CommandSpec::new("dnf", &["repoquery", "--userinstalled", "--qf", "%{name}\n"]),
            ListFormat::Lines,
        ),
        ManagerId::Yum => (
            CommandSpec::new("yum", &["--version"]),
            CommandSpec::new("repoquery", &["--userinstalled", "--qf", "%{name}"]),
            ListFormat::Lines,
        ),
        ManagerId::Pacman => (
            CommandSpec::new("pacman", &["--version"]),
            CommandSpec::new("pacman", &["-Qe", "--quiet"]),
            ListFormat::Lines,
        ),
        ManagerId::Apk => (
            CommandSpec::new("apk", &["--version"]),
            CommandSpec::new("cat", &["/etc/apk/world"]),
            ListFormat::ApkWorld,
        ),
        ManagerId::Zypper => (
            CommandSpec::new("zypper", &["--version"]),
            CommandSpec::new(
                "zypper",
                &["--quiet", "search", "--installed-only", "--type", "package"],
            ),
            ListFormat::ZypperTable,
        ),
        ManagerId::Portage => (
            CommandSpec::new("emerge", &["--version"]),
            CommandSpec::new("qlist", &["-I"]),
            ListFormat::PortageAtoms,
        ),
        ManagerId::Xbps => (
            CommandSpec::new("xbps-query", &["--version"]),
            CommandSpec::new("xbps-query", &["-m"]),
            ListFormat::XbpsPkgver,
        ),
        ManagerId::Unknown => return None,
    };

    Some(ManagerSpec {
        id,
        probe,
        list,
        format,
    })
}

/// Package manager driven entirely by its [`ManagerSpec`]
pub struct SpecManager {
    spec: ManagerSpec,
}

impl SpecManager {
    pub fn new(spec: ManagerSpec) -> Self {
        Self { spec }
    }

    /// Replace the listing command; output is then read as one name per line
    pub fn with_list_command(mut self, list: CommandSpec) -> Self {
        self.spec.list = list;
        self.spec.format = ListFormat::Lines;
        self
    }

    pub fn spec(&self) -> &ManagerSpec {
        &self.spec
    }
}

impl PackageManager for SpecManager {
    fn id(&self) -> ManagerId {
        self.spec.id
    }

    fn is_available(&self, runner: &dyn CommandRunner) -> bool {
        matches!(runner.run(&self.spec.probe), Ok(out) if out.success)
    }

    fn list_installed(&self, runner: &dyn CommandRunner) -> Result<Vec<String>> {
        let command = self.spec.list.display();
        let output = runner.run(&self.spec.list)?;

        if !output.success {
            let stderr = output.stderr.trim();
            return Err(HostsnapError::SystemCommandFailed {
                command,
                reason: if stderr.is_empty() {
                    "exited with non-zero status".to_string()
                } else {
                    stderr.to_string()
                },
            });
        }

        Ok(self.spec.format.parse(&output.stdout))
    }
}

/// Registry mapping manager variants to their adapters
pub struct BackendRegistry {
    managers: HashMap<ManagerId, Box<dyn PackageManager>>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            managers: HashMap::new(),
        }
    }

    /// Registry holding every built-in manager
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for id in ManagerId::DETECTION_ORDER {
            if let Some(spec) = builtin_spec(id) {
                registry.register(Box::new(SpecManager::new(spec)));
            }
        }
        registry
    }

    /// Register (or replace) the adapter for a manager
    pub fn register(&mut self, manager: Box<dyn PackageManager>) {
        self.managers.insert(manager.id(), manager);
    }

    pub fn get(&self, id: ManagerId) -> Option<&dyn PackageManager> {
        self.managers.get(&id).map(|m| m.as_ref())
    }

    /// Make `id` list packages with `list` instead of its built-in command.
    ///
    /// Also applies to `Unknown`, so an explicit command still enumerates
    /// on hosts where detection finds nothing.
    pub fn override_list_command(&mut self, id: ManagerId, list: CommandSpec) {
        let spec = builtin_spec(id).unwrap_or_else(|| ManagerSpec {
            id,
            probe: list.clone(),
            list: list.clone(),
            format: ListFormat::Lines,
        });
        self.register(Box::new(SpecManager::new(spec).with_list_command(list)));
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
