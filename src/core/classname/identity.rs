//! Deriving a file's canonical class, from where it lives or from what it says.
//!
//! The two derivations are independent and may disagree; callers compare the
//! results by value. Both go through an [`IdentityCache`] owned by the
//! [`ClassResolver`], with an explicit [`Freshness`] per lookup.

use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::canonical::{is_package_name, is_simple_name, CanonicalClass};
use super::dialect::Dialect;
use super::matchers::{match_import, match_package, match_type_declaration};
use crate::error::{Error, Result};
use crate::utils::path::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Derivation {
    Location,
    Contents,
}

/// Whether a lookup may be answered from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Cached,
    /// Re-derive and overwrite the cached entry. Required once files may have
    /// been rewritten or moved since they were last seen.
    Fresh,
}

/// The identity derived for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileClassInfo {
    pub path: PathBuf,
    pub class: CanonicalClass,
    /// Non-wildcard imports in file order. Always empty for location-derived info.
    pub imports: Vec<CanonicalClass>,
    pub derivation: Derivation,
}

impl FileClassInfo {
    pub fn imports_class(&self, class: &CanonicalClass) -> bool {
        self.imports.iter().any(|i| i == class)
    }
}

/// Which ordering rule a scanned file broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedRule {
    PackageDeclaration,
    ImportStatement,
    ClassDeclaration,
    MissingDeclarations,
}

impl MalformedRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MalformedRule::PackageDeclaration => "package declaration",
            MalformedRule::ImportStatement => "import statement",
            MalformedRule::ClassDeclaration => "class declaration",
            MalformedRule::MissingDeclarations => "missing package or class declaration",
        }
    }
}

/// Per-run memo of derived identities, one map per derivation.
///
/// Entries are never evicted. Failed derivations are not stored.
#[derive(Debug, Default)]
pub struct IdentityCache {
    location: HashMap<PathBuf, FileClassInfo>,
    contents: HashMap<PathBuf, FileClassInfo>,
}

impl IdentityCache {
    fn map(&self, derivation: Derivation) -> &HashMap<PathBuf, FileClassInfo> {
        match derivation {
            Derivation::Location => &self.location,
            Derivation::Contents => &self.contents,
        }
    }

    fn map_mut(&mut self, derivation: Derivation) -> &mut HashMap<PathBuf, FileClassInfo> {
        match derivation {
            Derivation::Location => &mut self.location,
            Derivation::Contents => &mut self.contents,
        }
    }

    pub fn get(&self, derivation: Derivation, key: &Path) -> Option<&FileClassInfo> {
        self.map(derivation).get(key)
    }

    pub fn insert(&mut self, key: PathBuf, info: FileClassInfo) {
        self.map_mut(info.derivation).insert(key, info);
    }

    pub fn len(&self) -> usize {
        self.location.len() + self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves file identities relative to one project base.
#[derive(Debug)]
pub struct ClassResolver {
    base: PathBuf,
    cache: IdentityCache,
}

impl ClassResolver {
    pub fn new(base: &Path) -> Self {
        Self {
            base: normalize(base),
            cache: IdentityCache::default(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn cache(&self) -> &IdentityCache {
        &self.cache
    }

    pub fn from_location(&mut self, path: &Path, freshness: Freshness) -> Result<FileClassInfo> {
        self.resolve(path, Derivation::Location, freshness)
    }

    pub fn from_contents(&mut self, path: &Path, freshness: Freshness) -> Result<FileClassInfo> {
        self.resolve(path, Derivation::Contents, freshness)
    }

    fn resolve(
        &mut self,
        path: &Path,
        derivation: Derivation,
        freshness: Freshness,
    ) -> Result<FileClassInfo> {
        let key = normalize(path);

        if freshness == Freshness::Cached {
            if let Some(hit) = self.cache.get(derivation, &key) {
                return Ok(hit.clone());
            }
        }

        let info = match derivation {
            Derivation::Location => identity_from_location(&self.base, &key)?,
            Derivation::Contents => identity_from_contents(&key)?,
        };
        self.cache.insert(key, info.clone());
        Ok(info)
    }
}

/// Identity implied by the file's path under `base`. Never reads the file.
pub fn identity_from_location(base: &Path, path: &Path) -> Result<FileClassInfo> {
    let path = normalize(path);
    let base = normalize(base);
    let shown = path.display().to_string();

    let relative = path
        .strip_prefix(&base)
        .map_err(|_| {
            Error::class_invalid_package(shown.clone(), Some(shown.clone())).with_hint(format!(
                "File is outside the project base {}",
                base.display()
            ))
        })?;

    let file_name = relative
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::class_invalid_name(shown.clone(), Some(shown.clone())))?;

    let stem = match Dialect::from_path(relative) {
        Some(dialect) => file_name
            .strip_suffix(dialect.extension())
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(file_name),
        None => file_name,
    };
    if !is_simple_name(stem) {
        return Err(Error::class_invalid_name(stem, Some(shown)));
    }

    let segments: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    let package = segments.join(".");
    if !is_package_name(&package) {
        return Err(Error::class_invalid_package(package, Some(shown)));
    }

    Ok(FileClassInfo {
        class: CanonicalClass::new(package, stem)?,
        path,
        imports: Vec::new(),
        derivation: Derivation::Location,
    })
}

/// Identity declared by the file's own package, imports and first type.
///
/// A single forward pass that stops at the first accepted type declaration.
/// Each line is tried as package, then import, then declaration.
pub fn identity_from_contents(path: &Path) -> Result<FileClassInfo> {
    let shown = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", shown))))?;
    let mut reader = BufReader::new(file);

    let malformed = |rule: MalformedRule, line: Option<usize>| {
        Error::source_malformed(shown.clone(), rule.as_str(), line)
    };

    let mut package: Option<String> = None;
    let mut imports: Vec<CanonicalClass> = Vec::new();
    let mut imports_collected = false;
    let mut class_name: Option<String> = None;

    let mut buf = Vec::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::internal_io(e.to_string(), Some(format!("read {}", shown))))?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);

        if let Some(pkg) = match_package(&line) {
            if package.is_some() || imports_collected || class_name.is_some() {
                return Err(malformed(MalformedRule::PackageDeclaration, Some(line_no)));
            }
            package = Some(pkg.name.to_string());
        }

        if let Some(import) = match_import(&line) {
            if package.is_none() || class_name.is_some() {
                return Err(malformed(MalformedRule::ImportStatement, Some(line_no)));
            }
            imports_collected = true;
            // Targets without a capitalized segment cannot name a class; skip them.
            if let Ok((class, _)) = import.imported_class() {
                imports.push(class);
            }
        }

        if let Some(decl) = match_type_declaration(&line) {
            if package.is_none() || class_name.is_some() {
                return Err(malformed(MalformedRule::ClassDeclaration, Some(line_no)));
            }
            class_name = Some(decl.name.to_string());
            break;
        }
    }

    let (Some(package), Some(class_name)) = (package, class_name) else {
        return Err(malformed(MalformedRule::MissingDeclarations, None));
    };

    Ok(FileClassInfo {
        class: CanonicalClass::new(package, class_name)?,
        path: normalize(path),
        imports,
        derivation: Derivation::Contents,
    })
}
