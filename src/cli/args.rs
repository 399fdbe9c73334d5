use crate::core::resolver::SubstringMatch;
use crate::core::types::ManagerId;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hostsnap",
    about = "Snapshot a Linux host's packages and their configuration",
    long_about = "Inventory installed packages, locate each package's configuration on disk, \
                  and back it up alongside a JSON manifest",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Settings file (default: <config dir>/hostsnap/hostsnap.kdl)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Home directory to search instead of the current user's
    #[arg(long, value_name = "DIR", global = true, help_heading = "Search")]
    pub home: Option<PathBuf>,

    /// Skip detection and use this package manager
    #[arg(long, value_name = "MANAGER", global = true, help_heading = "Search")]
    pub manager: Option<ManagerId>,

    /// How the recursive name search matches
    #[arg(long, value_enum, global = true, help_heading = "Search")]
    pub substring_match: Option<SubstringMatchArg>,

    /// Depth limit for the recursive name search
    #[arg(long, value_name = "N", global = true, help_heading = "Search")]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy every located config into the output directory and write the manifest
    Backup {
        /// Output directory (default: ~/hostsnap)
        #[arg(short = 'o', long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Print the inventory without copying anything
    Report {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = ReportFormatArg::Table)]
        format: ReportFormatArg,

        /// Also write the JSON artifacts to the output directory
        #[arg(long)]
        write: bool,

        /// Output directory used with --write (default: ~/hostsnap)
        #[arg(short = 'o', long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormatArg {
    Table,
    Json,
    Yaml,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubstringMatchArg {
    /// Name must be bounded by non-alphanumerics
    Token,
    /// Plain substring containment
    Contains,
    /// Disable the recursive search
    Off,
}

impl From<SubstringMatchArg> for SubstringMatch {
    fn from(arg: SubstringMatchArg) -> Self {
        match arg {
            SubstringMatchArg::Token => SubstringMatch::Token,
            SubstringMatchArg::Contains => SubstringMatch::Contains,
            SubstringMatchArg::Off => SubstringMatch::Off,
        }
    }
}
