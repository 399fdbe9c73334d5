//! Output side of a run: JSON artifacts and the config backup.

pub mod backup;
pub mod writer;

pub use backup::{BackupReport, CopyFailure, CopyRecord, backup_configs};
pub use writer::{Artifact, read_inventory, write_artifact, write_json};
