use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*$").unwrap());

static SIMPLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

pub fn is_package_name(name: &str) -> bool {
    PACKAGE_NAME.is_match(name)
}

pub fn is_simple_name(name: &str) -> bool {
    SIMPLE_NAME.is_match(name)
}

/// A package-qualified type name such as `com.acme.util.Strings`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CanonicalClass {
    package: String,
    simple_name: String,
}

impl CanonicalClass {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Result<Self> {
        let package = package.into();
        let simple_name = simple_name.into();

        if !is_package_name(&package) {
            return Err(Error::class_invalid_package(package, None));
        }
        if !is_simple_name(&simple_name) {
            return Err(Error::class_invalid_name(simple_name, None));
        }

        Ok(Self {
            package,
            simple_name,
        })
    }

    /// Decompose a dotted name: the simple name is the last segment starting
    /// with an uppercase letter, everything before it is the package.
    pub fn parse(dotted: &str) -> Result<Self> {
        Self::split_member(dotted).map(|(class, _)| class)
    }

    /// Like [`parse`](Self::parse), but also returns whatever follows the
    /// class segment (`.member` for static member imports, else empty).
    pub fn split_member(dotted: &str) -> Result<(Self, &str)> {
        let segments: Vec<&str> = dotted.split('.').collect();
        let index = segments
            .iter()
            .rposition(|s| s.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
            .ok_or_else(|| Error::class_invalid_name(dotted, None))?;

        let class = Self::new(segments[..index].join("."), segments[index])?;

        let consumed: usize = segments[..=index].iter().map(|s| s.len()).sum::<usize>() + index;
        Ok((class, &dotted[consumed..]))
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.simple_name)
    }

    /// Path of the source file for this class relative to the project base.
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = self.package.split('.').collect();
        path.push(format!("{}.{}", self.simple_name, extension));
        path
    }
}

impl fmt::Display for CanonicalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.simple_name)
    }
}

impl From<CanonicalClass> for String {
    fn from(class: CanonicalClass) -> Self {
        class.qualified_name()
    }
}
