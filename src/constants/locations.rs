//! Built-in search locations.
//!
//! Entries starting with `~` are expanded against the configured home
//! directory. Order is search priority: the most specific, most likely
//! locations come first.

/// Candidate locations for the exact-name and listing strategies
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "~/.config",
    "~/.local/share",
    "~/.var/app",
    "~/.cache",
    "/etc",
    "/var/lib",
    "/var",
];

/// Roots walked by the recursive substring search
pub const DEFAULT_WALK_ROOTS: &[&str] = &["/etc", "/var", "~/.config"];

/// Conventional system config roots probed for a file named after the package
pub const DEFAULT_FALLBACK_ROOTS: &[&str] = &["/etc", "/etc/default", "/etc/sysconfig"];
