//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling and atomic line rewrites
//! - `path` - Lexical normalization and base-relative display
//! - `walk` - Sorted source-file enumeration

pub mod io;
pub mod path;
pub mod walk;
