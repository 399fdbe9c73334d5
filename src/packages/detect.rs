use crate::core::types::ManagerId;
use crate::packages::registry::BackendRegistry;
use crate::packages::runner::CommandRunner;
use crate::ui;

/// Detect the system package manager.
///
/// Probes managers in [`ManagerId::DETECTION_ORDER`] and returns the first
/// one that answers. Probing stops at that manager. Returns
/// [`ManagerId::Unknown`] when nothing answers; detection never fails the run.
pub fn detect(registry: &BackendRegistry, runner: &dyn CommandRunner) -> ManagerId {
    for id in ManagerId::DETECTION_ORDER {
        let Some(manager) = registry.get(id) else {
            continue;
        };

        if manager.is_available(runner) {
            ui::verbose(&format!("Detected package manager: {}", id));
            return id;
        }
        ui::verbose(&format!("Package manager not present: {}", id));
    }

    ManagerId::Unknown
}
