// Common constants used throughout the codebase

/// Marker written in place of paths when no configuration was located
pub const NOT_FOUND: &str = "-";

/// Value reported when the OS or package manager cannot be identified
pub const UNKNOWN: &str = "unknown";

/// Artifact file extension
pub const ARTIFACT_EXTENSION: &str = "json";

pub const SYSTEM_ARTIFACT: &str = "system";
pub const PACKAGES_ARTIFACT: &str = "packages";
pub const CONFIGS_ARTIFACT: &str = "configs";
pub const SNAPS_ARTIFACT: &str = "snaps";
pub const FLATPAKS_ARTIFACT: &str = "flatpaks";
pub const BACKUP_ARTIFACT: &str = "backup";

/// Default depth for the recursive substring search
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default timeout for any external command, in seconds
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// os-release file consulted for the OS identifier
pub const OS_RELEASE_PATH: &str = "/etc/os-release";
