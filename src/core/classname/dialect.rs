use serde::Serialize;
use std::path::Path;

/// The two source dialects laid out as "package mirrors directory".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Java,
    Groovy,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Java, Dialect::Groovy];

    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::Java => "java",
            Dialect::Groovy => "groovy",
        }
    }

    /// Whether the file stem must equal the declared top-level type.
    ///
    /// Groovy lets a file declare a class under a different name.
    pub fn strict_file_naming(&self) -> bool {
        matches!(self, Dialect::Java)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.extension() == ext)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}
