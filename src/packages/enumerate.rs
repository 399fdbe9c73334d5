use crate::core::types::ManagerId;
use crate::error::Result;
use crate::packages::registry::BackendRegistry;
use crate::packages::runner::CommandRunner;
use std::collections::HashSet;

/// List the packages the user installed through `manager`.
///
/// `Unknown` (or a manager missing from the registry) yields an empty list.
/// A failing command is returned as `Err` so the caller decides whether to
/// degrade to "no packages found". Duplicate names are dropped, keeping the
/// first occurrence.
pub fn list_installed(
    registry: &BackendRegistry,
    manager: ManagerId,
    runner: &dyn CommandRunner,
) -> Result<Vec<String>> {
    let Some(adapter) = registry.get(manager) else {
        return Ok(Vec::new());
    };

    let mut seen = HashSet::new();
    let packages = adapter
        .list_installed(runner)?
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect();

    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostsnapError;
    use crate::packages::runner::{CommandOutput, CommandSpec};

    struct FixedOutput {
        success: bool,
        stdout: &'static str,
    }

    impl CommandRunner for FixedOutput {
        fn run(&self, _spec: &CommandSpec) -> Result<CommandOutput> {
            Ok(CommandOutput {
                success: self.success,
                stdout: self.stdout.to_string(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn lists_pacman_packages_in_order() {
        let runner = FixedOutput {
            success: true,
            stdout: "firefox\n\n  vim-git \nfirefox\n",
        };
        let packages =
            list_installed(&BackendRegistry::with_defaults(), ManagerId::Pacman, &runner).unwrap();
        assert_eq!(packages, vec!["firefox", "vim-git"]);
    }

    #[test]
    fn unknown_manager_lists_nothing() {
        let runner = FixedOutput {
            success: true,
            stdout: "should-not-be-read\n",
        };
        let packages =
            list_installed(&BackendRegistry::with_defaults(), ManagerId::Unknown, &runner).unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn failing_command_is_an_error() {
        let runner = FixedOutput {
            success: false,
            stdout: "",
        };
        let result = list_installed(&BackendRegistry::with_defaults(), ManagerId::Apt, &runner);
        assert!(matches!(
            result,
            Err(HostsnapError::SystemCommandFailed { .. })
        ));
    }
}
