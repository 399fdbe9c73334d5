use crate::error::{HostsnapError, Result};
use crate::project_identity;
use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf};

/// Expand a leading `~` against an explicit home directory.
pub fn expand_home(path: &Path, home: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str == "~" {
        return Ok(home.to_path_buf());
    }

    let stripped = path_str
        .strip_prefix("~/")
        .ok_or_else(|| HostsnapError::PathError(format!("Invalid path format: {}", path_str)))?;

    Ok(home.join(stripped))
}

/// Home directory of the invoking user
pub fn home_dir() -> Result<PathBuf> {
    let user_dirs = UserDirs::new().ok_or_else(|| {
        HostsnapError::PathError("Could not determine user home directory".to_string())
    })?;

    Ok(user_dirs.home_dir().to_path_buf())
}

pub fn config_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("", "", project_identity::CONFIG_DIR_NAME).ok_or_else(|| {
        HostsnapError::PathError("Could not determine config directory".to_string())
    })?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(project_identity::CONFIG_FILE_BASENAME))
}
