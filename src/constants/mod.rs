pub mod common;
pub mod locations;
pub mod package_suffixes;

pub use common::{
    ARTIFACT_EXTENSION, BACKUP_ARTIFACT, CONFIGS_ARTIFACT, FLATPAKS_ARTIFACT, NOT_FOUND,
    PACKAGES_ARTIFACT, SNAPS_ARTIFACT, SYSTEM_ARTIFACT, UNKNOWN,
};
pub use locations::{DEFAULT_FALLBACK_ROOTS, DEFAULT_LOCATIONS, DEFAULT_WALK_ROOTS};
pub use package_suffixes::{VARIANTS, strip_variant};
