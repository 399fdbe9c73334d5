pub mod settings;

pub use settings::{Overrides, RunConfig, Settings};
