pub mod models;
pub mod parsers;
pub mod auth;
pub mod materialize;
pub mod planner;
pub mod engine;
pub mod response_analysis;
pub mod verdict;
pub mod summary;
pub mod reporting;

// Re-export commonly used items
pub use models::*;
pub use parsers::{load, ConfigError, ConfigErrorKind, ConfigParser, KongParser};
pub use auth::*;
pub use materialize::*;
pub use planner::*;
pub use engine::*;
pub use response_analysis::*;
pub use verdict::*;
pub use summary::*;
pub use reporting::*;
