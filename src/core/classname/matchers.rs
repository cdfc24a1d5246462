//! Single-line recognizers for package, import and top-level type declarations.
//!
//! Each matcher takes one physical line (terminator included) and either
//! returns nothing or the pieces needed to print the line back with only the
//! name swapped. Indentation and everything after the name (punctuation,
//! trailing comments, the line terminator) are kept verbatim; whitespace
//! between keywords is normalized to a single space on render.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::canonical::CanonicalClass;
use crate::error::Result;

static PACKAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^(?P<indent>\x{FEFF}?[ \t]*)package\s+(?P<name>[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)(?P<tail>\s*(?:;.*|//.*)?)$",
    )
    .unwrap()
});

static IMPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // The tail may not start with '.', which keeps `import a.b.*;` out.
    Regex::new(
        r"(?s)^(?P<indent>[ \t]*)import\s+(?P<mods>(?:static\s+)?)(?P<name>[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*)(?P<tail>(?:\s+as\s+[A-Za-z_$][\w$]*)?\s*(?:;.*|//.*)?)$",
    )
    .unwrap()
});

static TYPE_DECLARATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^(?P<indent>[ \t]*)(?P<mods>(?:(?:public|protected|private|abstract|final|static|strictfp|sealed|non-sealed)\s+)*)(?P<kind>class|interface|enum|record|@interface|trait)\s+(?P<name>[A-Za-z_$][\w$]*)(?P<tail>(?:[\s<{(].*)?)$",
    )
    .unwrap()
});

/// `package a.b.c;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageStatement<'a> {
    pub indent: &'a str,
    pub name: &'a str,
    pub tail: &'a str,
}

impl PackageStatement<'_> {
    /// Everything up to and including the name, with `name` swapped in.
    pub fn head(&self, name: &str) -> String {
        format!("{}package {}", self.indent, name)
    }

    pub fn render(&self, name: &str) -> String {
        format!("{}{}", self.head(name), self.tail)
    }
}

/// `import [static] a.b.Foo[.member] [as Alias];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement<'a> {
    pub indent: &'a str,
    pub modifiers: Vec<&'a str>,
    pub target: &'a str,
    pub tail: &'a str,
}

impl<'a> ImportStatement<'a> {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&"static")
    }

    /// The class this import names, plus any trailing member/nested suffix.
    ///
    /// A static import always ends in a member, so its last segment is set
    /// aside before the class is picked out of what remains.
    pub fn imported_class(&self) -> Result<(CanonicalClass, &'a str)> {
        let target: &'a str = self.target;
        let owner = match (self.is_static(), target.rfind('.')) {
            (true, Some(dot)) => &target[..dot],
            _ => target,
        };
        let (class, rest) = CanonicalClass::split_member(owner)?;
        let suffix_start = owner.len() - rest.len();
        Ok((class, &target[suffix_start..]))
    }

    pub fn head(&self, target: &str) -> String {
        format!("{}import {}{}", self.indent, spaced(&self.modifiers), target)
    }

    pub fn render(&self, target: &str) -> String {
        format!("{}{}", self.head(target), self.tail)
    }
}

/// `public final class Foo<T> extends Bar {`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration<'a> {
    pub indent: &'a str,
    pub modifiers: Vec<&'a str>,
    pub kind: &'a str,
    pub name: &'a str,
    pub tail: &'a str,
}

impl TypeDeclaration<'_> {
    pub fn head(&self, name: &str) -> String {
        format!("{}{}{} {}", self.indent, spaced(&self.modifiers), self.kind, name)
    }

    pub fn render(&self, name: &str) -> String {
        format!("{}{}", self.head(name), self.tail)
    }
}

fn spaced(tokens: &[&str]) -> String {
    tokens.iter().map(|t| format!("{} ", t)).collect()
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map(|m| m.as_str()).unwrap_or("")
}

pub fn match_package(line: &str) -> Option<PackageStatement<'_>> {
    let caps = PACKAGE_PATTERN.captures(line)?;
    Some(PackageStatement {
        indent: group(&caps, "indent"),
        name: group(&caps, "name"),
        tail: group(&caps, "tail"),
    })
}

pub fn match_import(line: &str) -> Option<ImportStatement<'_>> {
    let caps = IMPORT_PATTERN.captures(line)?;
    Some(ImportStatement {
        indent: group(&caps, "indent"),
        modifiers: group(&caps, "mods").split_whitespace().collect(),
        target: group(&caps, "name"),
        tail: group(&caps, "tail"),
    })
}

pub fn match_type_declaration(line: &str) -> Option<TypeDeclaration<'_>> {
    let caps = TYPE_DECLARATION_PATTERN.captures(line)?;
    Some(TypeDeclaration {
        indent: group(&caps, "indent"),
        modifiers: group(&caps, "mods").split_whitespace().collect(),
        kind: group(&caps, "kind"),
        name: group(&caps, "name"),
        tail: group(&caps, "tail"),
    })
}
