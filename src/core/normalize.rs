//! Canonical comparison keys for package names.
//!
//! Keys are only ever compared, never persisted as identities. Different
//! packages may collapse onto the same key.

use crate::constants::strip_variant;

/// Lower-case a package name and strip known variant suffixes.
///
/// Suffixes are stripped until none applies, so stacked variants such as
/// `foo-bin-git` reduce to `foo` and `normalize(normalize(x)) == normalize(x)`.
///
/// ```
/// # use hostsnap::core::normalize::normalize;
/// assert_eq!(normalize("Foo-Git"), "foo");
/// assert_eq!(normalize("firefox"), "firefox");
/// ```
pub fn normalize(name: &str) -> String {
    let mut key = name.trim().to_lowercase();

    while let Some(base) = strip_variant(&key) {
        key = base.to_string();
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_case_insensitive() {
        assert_eq!(normalize("Foo-Git"), normalize("foo-git"));
        assert_eq!(normalize("foo-git"), "foo");
    }

    #[test]
    fn normalize_is_idempotent() {
        for name in ["Foo-Git", "neovim-nightly", "foo-git-bin", "brave-browser", "bat", "-git"] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn normalize_strips_stacked_suffixes() {
        assert_eq!(normalize("foo-git-bin"), "foo");
    }

    #[test]
    fn normalize_leaves_plain_names() {
        assert_eq!(normalize("ripgrep"), "ripgrep");
        assert_eq!(normalize("org.mozilla.Firefox"), "org.mozilla.firefox");
    }

    #[test]
    fn normalize_keeps_bare_suffix_names() {
        assert_eq!(normalize("-git"), "-git");
    }
}
