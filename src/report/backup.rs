//! Copy resolved configuration paths into the backup directory.
//!
//! Each found path lands at `<dest>/<normalized package>/<basename>`.
//! Directories are copied recursively with symlinks recreated, not followed.

use crate::core::normalize;
use crate::core::types::{ConfigResolution, ResolutionMap};
use crate::error::{HostsnapError, Result};
use crate::ui;
use crate::utils::cancel::CancelToken;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyRecord {
    pub package: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyFailure {
    pub package: String,
    pub source: PathBuf,
    pub reason: String,
}

/// Outcome of a backup pass, written as `backup.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupReport {
    pub copied: Vec<CopyRecord>,
    pub failed: Vec<CopyFailure>,
}

impl BackupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Copy every `Found` path in `configs` under `dest`.
///
/// Individual copy failures are collected in the report for the caller to
/// surface, and the pass continues. Only cancellation or an unusable `dest`
/// aborts.
pub fn backup_configs(
    configs: &ResolutionMap,
    dest: &Path,
    cancel: &CancelToken,
) -> Result<BackupReport> {
    fs::create_dir_all(dest).map_err(|e| HostsnapError::io(dest, e))?;

    let mut report = BackupReport::default();

    for (package, resolution) in configs {
        let ConfigResolution::Found(paths) = resolution else {
            continue;
        };

        let package_dir = dest.join(normalize(package));
        let mut used_names = HashSet::new();

        for source in paths {
            cancel.check()?;

            let destination = unique_destination(&package_dir, source, &mut used_names);
            match copy_path(source, &destination, dest) {
                Ok(()) => {
                    ui::verbose(&format!(
                        "Copied {} -> {}",
                        source.display(),
                        destination.display()
                    ));
                    report.copied.push(CopyRecord {
                        package: package.clone(),
                        source: source.clone(),
                        destination,
                    });
                }
                Err(e) => {
                    ui::verbose(&format!("Copy failed for {}: {}", source.display(), e));
                    report.failed.push(CopyFailure {
                        package: package.clone(),
                        source: source.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    Ok(report)
}

/// `<package_dir>/<basename>`, suffixed with `-2`, `-3`... when two sources
/// of one package share a basename.
fn unique_destination(package_dir: &Path, source: &Path, used: &mut HashSet<String>) -> PathBuf {
    let base = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string());

    let mut candidate = base.clone();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }

    package_dir.join(candidate)
}

/// Resolved form of `path` for containment checks; the path as given when it
/// cannot be resolved.
fn resolved(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn copy_path(source: &Path, destination: &Path, backup_root: &Path) -> Result<()> {
    if resolved(backup_root).starts_with(resolved(source)) {
        return Err(HostsnapError::PathError(format!(
            "backup directory {} lies inside {}",
            backup_root.display(),
            source.display()
        )));
    }

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| HostsnapError::io(source, io::Error::from(e)))?;
        let relative = entry.path().strip_prefix(source).map_err(|_| {
            HostsnapError::PathError(format!(
                "{} is not under {}",
                entry.path().display(),
                source.display()
            ))
        })?;
        let target = if relative.as_os_str().is_empty() {
            destination.to_path_buf()
        } else {
            destination.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| HostsnapError::io(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| HostsnapError::io(parent, e))?;
        }

        if file_type.is_symlink() {
            let link = fs::read_link(entry.path()).map_err(|e| HostsnapError::io(entry.path(), e))?;
            replace_symlink(&link, &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| HostsnapError::io(entry.path(), e))?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn replace_symlink(link: &Path, target: &Path) -> Result<()> {
    if target.symlink_metadata().is_ok() {
        fs::remove_file(target).map_err(|e| HostsnapError::io(target, e))?;
    }
    std::os::unix::fs::symlink(link, target).map_err(|e| HostsnapError::io(target, e))
}

#[cfg(not(unix))]
fn replace_symlink(link: &Path, target: &Path) -> Result<()> {
    Err(HostsnapError::PathError(format!(
        "cannot recreate symlink {} -> {} on this platform",
        target.display(),
        link.display()
    )))
}
