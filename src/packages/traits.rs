use crate::core::types::ManagerId;
use crate::error::Result;
use crate::packages::runner::CommandRunner;

/// A system package manager as seen by the inventory.
///
/// Only two capabilities matter here: answering "are you installed?" and
/// listing the packages the user installed explicitly.
pub trait PackageManager {
    fn id(&self) -> ManagerId;

    /// Probe for presence. Any successful exit confirms the manager.
    fn is_available(&self, runner: &dyn CommandRunner) -> bool;

    /// List explicitly installed packages, in the manager's output order
    fn list_installed(&self, runner: &dyn CommandRunner) -> Result<Vec<String>>;
}
