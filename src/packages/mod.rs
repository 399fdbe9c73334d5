//! # Package Manager Adapters
//!
//! Thin adapters around external commands:
//!
//! - **Detection** (`detect.rs`): probe managers in priority order
//! - **Enumeration** (`enumerate.rs`): list user-installed packages
//! - **App stores** (`appstore.rs`): snap and flatpak application names
//!
//! Managers are a closed set of [`ManagerId`](crate::core::types::ManagerId)
//! variants whose commands live as data in `registry.rs`. All process
//! execution goes through the [`CommandRunner`] trait.

pub mod appstore;
pub mod detect;
pub mod enumerate;
pub mod parsers;
pub mod registry;
pub mod runner;
pub mod traits;

pub use registry::{BackendRegistry, ManagerSpec, SpecManager};
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use traits::PackageManager;
