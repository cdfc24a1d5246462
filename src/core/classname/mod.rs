//! Class identity: what a source file declares itself to be, and where it lives.
//!
//! No parsing beyond single lines happens here. Package, import and type
//! declaration lines are recognized by pattern; everything else is opaque.

mod canonical;
mod dialect;
mod identity;
pub mod matchers;

pub use canonical::{is_package_name, is_simple_name, CanonicalClass};
pub use dialect::Dialect;
pub use identity::{
    identity_from_contents, identity_from_location, ClassResolver, Derivation, FileClassInfo,
    Freshness, IdentityCache, MalformedRule,
};
