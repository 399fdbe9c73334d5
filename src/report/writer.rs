use crate::constants::{
    ARTIFACT_EXTENSION, CONFIGS_ARTIFACT, FLATPAKS_ARTIFACT, PACKAGES_ARTIFACT, SNAPS_ARTIFACT,
    SYSTEM_ARTIFACT,
};
use crate::core::types::SystemInventory;
use crate::error::{HostsnapError, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Inventory views that can be written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    System,
    Packages,
    Configs,
    Snaps,
    Flatpaks,
}

impl Artifact {
    pub const ALL: [Artifact; 5] = [
        Artifact::System,
        Artifact::Packages,
        Artifact::Configs,
        Artifact::Snaps,
        Artifact::Flatpaks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::System => SYSTEM_ARTIFACT,
            Self::Packages => PACKAGES_ARTIFACT,
            Self::Configs => CONFIGS_ARTIFACT,
            Self::Snaps => SNAPS_ARTIFACT,
            Self::Flatpaks => FLATPAKS_ARTIFACT,
        }
    }

    /// Pretty-printed JSON for this view of the inventory
    pub fn render(&self, inventory: &SystemInventory) -> Result<String> {
        let json = match self {
            Self::System => serde_json::to_string_pretty(inventory)?,
            Self::Packages => serde_json::to_string_pretty(&inventory.packages)?,
            Self::Configs => serde_json::to_string_pretty(&inventory.configs)?,
            Self::Snaps => serde_json::to_string_pretty(&inventory.snaps)?,
            Self::Flatpaks => serde_json::to_string_pretty(&inventory.flatpaks)?,
        };
        Ok(json)
    }
}

pub fn artifact_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, ARTIFACT_EXTENSION))
}

/// Write one inventory view into `dir`
pub fn write_artifact(dir: &Path, artifact: Artifact, inventory: &SystemInventory) -> Result<PathBuf> {
    let content = artifact.render(inventory)?;
    let path = artifact_path(dir, artifact.name());
    write_atomically(&path, &content)?;
    Ok(path)
}

/// Serialize any value as `<dir>/<name>.json`
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    let content = serde_json::to_string_pretty(value)?;
    let path = artifact_path(dir, name);
    write_atomically(&path, &content)?;
    Ok(path)
}

pub fn read_inventory(path: &Path) -> Result<SystemInventory> {
    let content = fs::read_to_string(path).map_err(|e| HostsnapError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().ok_or_else(|| {
        HostsnapError::PathError(format!(
            "Invalid artifact path (no parent directory): {}",
            path.display()
        ))
    })?;

    fs::create_dir_all(dir).map_err(|e| HostsnapError::io(dir, e))?;

    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);

    let mut tmp_file = fs::File::create(&tmp_path).map_err(|e| HostsnapError::io(&tmp_path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .and_then(|_| tmp_file.write_all(b"\n"))
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| HostsnapError::io(&tmp_path, e))?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| HostsnapError::io(path, e))?;

    Ok(())
}
