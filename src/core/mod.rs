// Public modules
pub mod classname;
pub mod defaults;
pub mod error;
pub mod refactor;
pub mod report;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
