use crate::constants::{NOT_FOUND, UNKNOWN};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Supported system package managers.
///
/// Declaration order is detection order (assumed distro popularity).
/// To add a manager, add a variant here and a `ManagerSpec` entry in
/// `packages::registry`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerId {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Apk,
    Zypper,
    Portage,
    Xbps,
    Unknown,
}

impl ManagerId {
    /// Managers probed by the detector, in priority order
    pub const DETECTION_ORDER: [ManagerId; 8] = [
        ManagerId::Apt,
        ManagerId::Dnf,
        ManagerId::Yum,
        ManagerId::Pacman,
        ManagerId::Apk,
        ManagerId::Zypper,
        ManagerId::Portage,
        ManagerId::Xbps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Yum => "yum",
            Self::Pacman => "pacman",
            Self::Apk => "apk",
            Self::Zypper => "zypper",
            Self::Portage => "portage",
            Self::Xbps => "xbps",
            Self::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for ManagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManagerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        ManagerId::DETECTION_ORDER
            .into_iter()
            .chain([ManagerId::Unknown])
            .find(|id| id.as_str() == lowered)
            .ok_or_else(|| {
                format!(
                    "Unknown package manager '{}'. Valid: {}",
                    s,
                    ManagerId::DETECTION_ORDER
                        .iter()
                        .map(ManagerId::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Outcome of resolving one package to its configuration artifacts.
///
/// Serialized as a plain array of paths; `NotFound` is written as `["-"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PathBuf>", into = "Vec<PathBuf>")]
pub enum ConfigResolution {
    Found(Vec<PathBuf>),
    NotFound,
}

impl ConfigResolution {
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Found(paths) => paths,
            Self::NotFound => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl From<Vec<PathBuf>> for ConfigResolution {
    fn from(paths: Vec<PathBuf>) -> Self {
        let paths: Vec<PathBuf> = paths
            .into_iter()
            .filter(|p| p.as_os_str() != NOT_FOUND)
            .collect();

        if paths.is_empty() {
            ConfigResolution::NotFound
        } else {
            ConfigResolution::Found(paths)
        }
    }
}

impl From<ConfigResolution> for Vec<PathBuf> {
    fn from(resolution: ConfigResolution) -> Self {
        match resolution {
            ConfigResolution::Found(paths) => paths,
            ConfigResolution::NotFound => vec![PathBuf::from(NOT_FOUND)],
        }
    }
}

/// Package name → resolution, one entry per enumerated package
pub type ResolutionMap = BTreeMap<String, ConfigResolution>;

/// Status recorded for snap and flatpak applications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Installed,
}

pub type AppMap = BTreeMap<String, AppStatus>;

/// Aggregate snapshot of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInventory {
    pub os: String,
    #[serde(default)]
    pub hostname: Option<String>,
    pub pkg_manager: ManagerId,
    pub packages: Vec<String>,
    pub configs: ResolutionMap,
    #[serde(default)]
    pub snaps: AppMap,
    #[serde(default)]
    pub flatpaks: AppMap,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_id_parses_case_insensitively() {
        assert_eq!("Pacman".parse::<ManagerId>(), Ok(ManagerId::Pacman));
        assert_eq!("unknown".parse::<ManagerId>(), Ok(ManagerId::Unknown));
        assert!("brew".parse::<ManagerId>().is_err());
    }

    #[test]
    fn not_found_serializes_as_dash() {
        let json = serde_json::to_string(&ConfigResolution::NotFound).unwrap();
        assert_eq!(json, r#"["-"]"#);
    }

    #[test]
    fn empty_array_reads_as_not_found() {
        let parsed: ConfigResolution = serde_json::from_str("[]").unwrap();
        assert_eq!(parsed, ConfigResolution::NotFound);
    }

    #[test]
    fn found_paths_round_trip() {
        let found = ConfigResolution::Found(vec![PathBuf::from("/home/u/.config/mpv")]);
        let json = serde_json::to_string(&found).unwrap();
        let back: ConfigResolution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, found);
    }
}
