//! Package → configuration path resolution.
//!
//! For every package the resolver tries its strategies from most precise to
//! least precise and keeps the first one that produces a hit:
//!
//! 1. [`Strategy::CanonicalName`]: `<location>/<normalized>` or `<location>/<name>`
//! 2. [`Strategy::Dotfile`]: `~/.<normalized>`
//! 3. [`Strategy::ListingMatch`]: a child of a location whose normalized name matches
//! 4. [`Strategy::SubstringSearch`]: bounded recursive walk of the walk roots
//! 5. [`Strategy::Fallback`]: a file named after the package in a fallback root
//!
//! Filesystem errors (permission denied, broken symlinks, vanished entries)
//! count as "not present". The only error a resolution can return is
//! [`HostsnapError::Interrupted`](crate::error::HostsnapError::Interrupted).

use crate::core::normalize::normalize;
use crate::core::types::{ConfigResolution, ResolutionMap};
use crate::error::Result;
use crate::utils::cancel::CancelToken;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    CanonicalName,
    Dotfile,
    ListingMatch,
    SubstringSearch,
    Fallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CanonicalName => "canonical name",
            Self::Dotfile => "dotfile",
            Self::ListingMatch => "directory listing",
            Self::SubstringSearch => "substring search",
            Self::Fallback => "fallback root",
        };
        f.write_str(label)
    }
}

/// How the recursive search compares entry names with the package name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstringMatch {
    /// Name must appear bounded by start/end or a non-alphanumeric character
    #[default]
    Token,
    /// Plain containment; `git` also matches `digit-recognizer`
    Contains,
    /// Skip the recursive search entirely
    Off,
}

impl FromStr for SubstringMatch {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token" => Ok(Self::Token),
            "contains" => Ok(Self::Contains),
            "off" => Ok(Self::Off),
            other => Err(format!(
                "Invalid substring-match '{}'. Valid: token, contains, off",
                other
            )),
        }
    }
}

/// Whether exact-name hits are collected from every location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Stop at the first hit
    #[default]
    First,
    /// Collect canonical-name hits from every location plus the dotfile
    All,
}

impl FromStr for ResolveMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "all" => Ok(Self::All),
            other => Err(format!("Invalid resolve-mode '{}'. Valid: first, all", other)),
        }
    }
}

/// Where and how to search. Fixed for the duration of a run.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub home: PathBuf,
    /// Candidate locations, highest priority first
    pub locations: Vec<PathBuf>,
    pub walk_roots: Vec<PathBuf>,
    pub fallback_roots: Vec<PathBuf>,
    pub max_depth: usize,
    pub substring_match: SubstringMatch,
    pub mode: ResolveMode,
}

/// A successful resolution and the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub paths: Vec<PathBuf>,
    pub strategy: Strategy,
}

/// Progress notification emitted after each package
#[derive(Debug)]
pub struct Progress<'a> {
    pub done: usize,
    pub total: usize,
    pub package: &'a str,
    pub matched: Option<&'a Match>,
}

pub struct ConfigResolver<'a> {
    plan: &'a SearchPlan,
    cancel: CancelToken,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(plan: &'a SearchPlan, cancel: CancelToken) -> Self {
        Self { plan, cancel }
    }

    /// Resolve every package, in order.
    ///
    /// The returned map holds exactly one entry per distinct package name.
    pub fn resolve<F>(&self, packages: &[String], mut on_progress: F) -> Result<ResolutionMap>
    where
        F: FnMut(Progress<'_>),
    {
        let total = packages.len();
        let mut resolutions = ResolutionMap::new();

        for (index, package) in packages.iter().enumerate() {
            self.cancel.check()?;

            let matched = self.resolve_package(package)?;
            on_progress(Progress {
                done: index + 1,
                total,
                package,
                matched: matched.as_ref(),
            });

            let resolution = matched
                .map(ConfigResolution::from)
                .unwrap_or(ConfigResolution::NotFound);
            resolutions.insert(package.clone(), resolution);
        }

        Ok(resolutions)
    }

    /// Run the strategies for one package and return the first hit
    pub fn resolve_package(&self, package: &str) -> Result<Option<Match>> {
        if !is_plain_name(package) {
            return Ok(None);
        }

        let key = normalize(package);

        if let Some(found) = self.canonical_and_dotfile(package, &key) {
            return Ok(Some(found));
        }

        if let Some(path) = self.listing_match(&key) {
            return Ok(Some(single(path, Strategy::ListingMatch)));
        }

        if let Some(path) = self.substring_search(package)? {
            return Ok(Some(single(path, Strategy::SubstringSearch)));
        }

        Ok(self
            .fallback(package)
            .map(|path| single(path, Strategy::Fallback)))
    }

    fn canonical_and_dotfile(&self, package: &str, key: &str) -> Option<Match> {
        let mut hits = Vec::new();

        for location in &self.plan.locations {
            if let Some(path) = canonical_hit(location, package, key) {
                if self.plan.mode == ResolveMode::First {
                    return Some(single(path, Strategy::CanonicalName));
                }
                hits.push(path);
            }
        }

        let strategy = if hits.is_empty() {
            Strategy::Dotfile
        } else {
            Strategy::CanonicalName
        };

        let dotfile = self.plan.home.join(format!(".{}", key));
        if dotfile.exists() && !hits.contains(&dotfile) {
            hits.push(dotfile);
        }

        (!hits.is_empty()).then_some(Match {
            paths: hits,
            strategy,
        })
    }

    fn listing_match(&self, key: &str) -> Option<PathBuf> {
        self.plan
            .locations
            .iter()
            .find_map(|location| sorted_children(location).into_iter().find(|child| {
                child
                    .file_name()
                    .map(|name| normalize(&name.to_string_lossy()) == key)
                    .unwrap_or(false)
            }))
    }

    fn substring_search(&self, package: &str) -> Result<Option<PathBuf>> {
        let Some(matcher) = NameMatcher::new(package, self.plan.substring_match) else {
            return Ok(None);
        };

        for root in &self.plan.walk_roots {
            let walker = WalkDir::new(root)
                .min_depth(1)
                .max_depth(self.plan.max_depth)
                .follow_links(false)
                .sort_by_file_name();

            for entry in walker {
                self.cancel.check()?;

                let Ok(entry) = entry else {
                    continue;
                };

                if matcher.is_match(&entry.file_name().to_string_lossy()) && entry.path().exists() {
                    return Ok(Some(entry.into_path()));
                }
            }
        }

        Ok(None)
    }

    fn fallback(&self, package: &str) -> Option<PathBuf> {
        self.plan
            .fallback_roots
            .iter()
            .map(|root| root.join(package))
            .find(|path| path.is_file())
    }
}

fn single(path: PathBuf, strategy: Strategy) -> Match {
    Match {
        paths: vec![path],
        strategy,
    }
}

/// Names that would escape a location when joined are never probed
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/') && !name.contains('\0')
}

fn canonical_hit(location: &Path, package: &str, key: &str) -> Option<PathBuf> {
    let normalized = location.join(key);
    if normalized.exists() {
        return Some(normalized);
    }

    let exact = location.join(package);
    (key != package && exact.exists()).then_some(exact)
}

/// Existing immediate children sorted by file name; unreadable directories are empty
fn sorted_children(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut children: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.exists())
        .collect();
    children.sort();
    children
}

/// Compares walk entry names against a lower-cased package name
struct NameMatcher {
    needle: String,
    token: Option<Regex>,
}

impl NameMatcher {
    fn new(package: &str, mode: SubstringMatch) -> Option<Self> {
        let needle = package.to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let token = match mode {
            SubstringMatch::Off => return None,
            SubstringMatch::Contains => None,
            SubstringMatch::Token => Some(
                Regex::new(&format!(
                    r"(?:^|[^\p{{L}}\p{{N}}]){}(?:[^\p{{L}}\p{{N}}]|$)",
                    regex::escape(&needle)
                ))
                .ok()?,
            ),
        };

        Some(Self { needle, token })
    }

    fn is_match(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        match &self.token {
            Some(re) => re.is_match(&name),
            None => name.contains(&self.needle),
        }
    }
}

impl From<Match> for ConfigResolution {
    fn from(found: Match) -> Self {
        ConfigResolution::Found(found.paths)
    }
}
