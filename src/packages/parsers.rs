//! Parsers for package listing output.
//!
//! Every parser trims lines and drops blanks; the format decides how a
//! package name is extracted from what remains.

/// Output format of a manager's "list user-installed packages" command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// One package name per line (apt-mark, pacman -Qe --quiet, dnf repoquery)
    Lines,
    /// `/etc/apk/world`: names with optional version or repository pins (`foo>=1.2`, `bar@edge`)
    ApkWorld,
    /// `zypper search` table: `S | Name | Summary | Type`, `i+` rows only
    ZypperTable,
    /// Portage atoms (`app-editors/vim`)
    PortageAtoms,
    /// xbps pkgver strings (`vim-9.0.1_1`)
    XbpsPkgver,
}

impl ListFormat {
    pub fn parse(&self, output: &str) -> Vec<String> {
        match self {
            Self::Lines => parse_lines(output),
            Self::ApkWorld => parse_apk_world(output),
            Self::ZypperTable => parse_zypper_table(output),
            Self::PortageAtoms => parse_portage_atoms(output),
            Self::XbpsPkgver => parse_xbps_pkgver(output),
        }
    }
}

fn non_blank_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Parse newline-delimited names
pub fn parse_lines(output: &str) -> Vec<String> {
    non_blank_lines(output).map(str::to_string).collect()
}

fn parse_apk_world(output: &str) -> Vec<String> {
    non_blank_lines(output)
        .filter_map(|line| {
            let end = line
                .find(['<', '>', '=', '~', '@'])
                .unwrap_or(line.len());
            let name = line[..end].trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

fn parse_zypper_table(output: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_body = false;

    for line in non_blank_lines(output) {
        // Separator row between header and body: "--+------+----"
        if line.starts_with('-') && line.contains('+') {
            in_body = true;
            continue;
        }
        if !in_body {
            continue;
        }

        // `i+` marks user-installed; plain `i` was pulled in as a dependency
        let mut columns = line.split('|').map(str::trim);
        if columns.next() != Some("i+") {
            continue;
        }
        if let Some(name) = columns.next()
            && !name.is_empty()
        {
            names.push(name.to_string());
        }
    }

    names
}

fn parse_portage_atoms(output: &str) -> Vec<String> {
    non_blank_lines(output)
        .map(|line| {
            line.rsplit_once('/')
                .map(|(_, name)| name)
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}

fn parse_xbps_pkgver(output: &str) -> Vec<String> {
    non_blank_lines(output)
        .map(|line| {
            // pkgver is "<name>-<version>_<revision>"; names may contain dashes
            match line.rsplit_once('-') {
                Some((name, version)) if version.contains('_') && !name.is_empty() => {
                    name.to_string()
                }
                _ => line.to_string(),
            }
        })
        .collect()
}
