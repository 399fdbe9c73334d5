pub mod normalize;
pub mod resolver;
pub mod types;

pub use normalize::normalize;
pub use resolver::{ConfigResolver, Match, ResolveMode, SearchPlan, Strategy, SubstringMatch};
pub use types::{AppMap, AppStatus, ConfigResolution, ManagerId, ResolutionMap, SystemInventory};
