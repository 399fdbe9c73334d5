use crate::constants::UNKNOWN;
use crate::packages::runner::{CommandRunner, CommandSpec};
use std::path::Path;

/// Detect the OS identifier.
///
/// Reads the first `ID=` line of the os-release file (quotes stripped),
/// falling back to `lsb_release -si` (lower-cased), then to `"unknown"`.
pub fn detect_os_id(os_release: &Path, runner: &dyn CommandRunner) -> String {
    if let Ok(content) = std::fs::read_to_string(os_release)
        && let Some(id) = parse_os_release_id(&content)
    {
        return id;
    }

    // Fallback: ask lsb_release
    if let Ok(out) = runner.run(&CommandSpec::new("lsb_release", &["-si"]))
        && out.success
    {
        let id = out.stdout.trim().to_lowercase();
        if !id.is_empty() {
            return id;
        }
    }

    UNKNOWN.to_string()
}

/// Extract the value of the first `ID=` line
pub fn parse_os_release_id(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("ID="))
        .map(|value| value.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HostsnapError, Result};
    use crate::packages::runner::CommandOutput;

    #[test]
    fn parses_quoted_and_bare_ids() {
        let arch = "NAME=\"Arch Linux\"\nPRETTY_NAME=\"Arch Linux\"\nID=arch\nBUILD_ID=rolling\n";
        assert_eq!(parse_os_release_id(arch).as_deref(), Some("arch"));

        let fedora = "NAME=\"Fedora Linux\"\nID=\"fedora\"\nVERSION_ID=40\n";
        assert_eq!(parse_os_release_id(fedora).as_deref(), Some("fedora"));
    }

    #[test]
    fn id_like_is_not_id() {
        let mint = "ID_LIKE=\"ubuntu debian\"\nID=linuxmint\n";
        assert_eq!(parse_os_release_id(mint).as_deref(), Some("linuxmint"));
    }

    #[test]
    fn missing_id_is_none() {
        assert_eq!(parse_os_release_id("NAME=Something\n"), None);
        assert_eq!(parse_os_release_id("ID=\"\"\n"), None);
    }

    struct Lsb(Option<&'static str>);

    impl CommandRunner for Lsb {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
            match self.0 {
                Some(out) => Ok(CommandOutput {
                    success: true,
                    stdout: out.to_string(),
                    stderr: String::new(),
                }),
                None => Err(HostsnapError::SystemCommandFailed {
                    command: spec.display(),
                    reason: "not found".to_string(),
                }),
            }
        }
    }

    #[test]
    fn falls_back_to_lsb_release() {
        let missing = Path::new("/nonexistent/os-release");
        assert_eq!(detect_os_id(missing, &Lsb(Some("Ubuntu\n"))), "ubuntu");
        assert_eq!(detect_os_id(missing, &Lsb(None)), "unknown");
    }

    #[test]
    fn reads_os_release_file_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("os-release");
        std::fs::write(&path, "ID=void\n").unwrap();
        assert_eq!(detect_os_id(&path, &Lsb(Some("Ubuntu"))), "void");
    }
}
