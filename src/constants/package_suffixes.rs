/// Common package suffix patterns for variant matching
///
/// Checked in this order; the first suffix that ends the name is the one
/// removed.
///
/// Example matching:
/// - "neovim-git" → "neovim"
/// - "brave-browser" → "brave"
pub const VARIANTS: &[&str] = &[
    "-git", "-bin", "-stable", "-nightly", "-dev", "-browser", "-beta", "-hg",
];

/// Strip one known variant suffix from an already lower-cased name
///
/// Returns `None` when no suffix applies. A suffix is never stripped if
/// nothing would remain of the name.
///
/// # Example
/// ```
/// # use hostsnap::constants::package_suffixes::strip_variant;
/// assert_eq!(strip_variant("hyprland-git"), Some("hyprland"));
/// assert_eq!(strip_variant("bat"), None);
/// assert_eq!(strip_variant("-git"), None);
/// ```
pub fn strip_variant(name: &str) -> Option<&str> {
    VARIANTS
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .filter(|base| !base.is_empty())
}

#[cfg(test)]
mod tests;
