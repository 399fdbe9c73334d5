//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const DISPLAY_NAME: &str = "Hostsnap";
pub const BINARY_NAME: &str = "hostsnap";
pub const CONFIG_DIR_NAME: &str = "hostsnap";
pub const CONFIG_FILE_BASENAME: &str = "hostsnap.kdl";
pub const ENV_PREFIX: &str = "HOSTSNAP";

/// Directory under the home directory that receives backups by default
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "hostsnap";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_uses_prefix() {
        assert_eq!(env_key("CONFIG"), "HOSTSNAP_CONFIG");
    }
}
