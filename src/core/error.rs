use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,

    ValidationMissingArgument,
    ValidationInvalidArgument,

    MoveSourceNotFound,
    MoveSourceNotFile,
    MoveDestinationExists,
    MoveDialectMismatch,
    MoveUnsupported,

    ClassInvalidName,
    ClassInvalidPackage,

    SourceMalformed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",

            ErrorCode::ValidationMissingArgument => "validation.missing_argument",
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::MoveSourceNotFound => "move.source_not_found",
            ErrorCode::MoveSourceNotFile => "move.source_not_file",
            ErrorCode::MoveDestinationExists => "move.destination_exists",
            ErrorCode::MoveDialectMismatch => "move.dialect_mismatch",
            ErrorCode::MoveUnsupported => "move.unsupported",

            ErrorCode::ClassInvalidName => "class.invalid_name",
            ErrorCode::ClassInvalidPackage => "class.invalid_package",

            ErrorCode::SourceMalformed => "source.malformed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }

    /// Identity failures that only mean "this file has no usable identity".
    ///
    /// The propagation walk absorbs these per file; everything else aborts the run.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ErrorCode::SourceMalformed
                | ErrorCode::ClassInvalidName
                | ErrorCode::ClassInvalidPackage
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingArgumentDetails {
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialectMismatchDetails {
    pub source: String,
    pub destination: String,
    pub source_extension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_extension: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidNameDetails {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMalformedDetails {
    pub path: String,
    pub rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_missing_argument(args: Vec<String>) -> Self {
        Self::new(
            ErrorCode::ValidationMissingArgument,
            "Missing required argument",
            to_details(MissingArgumentDetails { args }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        let problem = problem.into();
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            format!("Invalid argument: {}", problem),
            to_details(InvalidArgumentDetails {
                field: field.into(),
                problem,
                value,
            }),
        )
    }

    pub fn move_source_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::MoveSourceNotFound,
            format!("Source file not found: {}", path),
            to_details(PathDetails { path }),
        )
    }

    pub fn move_source_not_file(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::MoveSourceNotFile,
            format!("Source is not a regular file: {}", path),
            to_details(PathDetails { path }),
        )
    }

    pub fn move_destination_exists(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::MoveDestinationExists,
            format!("Destination already exists: {}", path),
            to_details(PathDetails { path }),
        )
        .with_hint("Remove the existing file or pick another destination")
    }

    pub fn move_dialect_mismatch(details: DialectMismatchDetails) -> Self {
        let message = format!(
            "Source and destination must share an extension (.{} vs {})",
            details.source_extension,
            details
                .destination_extension
                .as_deref()
                .map(|ext| format!(".{}", ext))
                .unwrap_or_else(|| "no extension".to_string())
        );
        Self::new(ErrorCode::MoveDialectMismatch, message, to_details(details))
    }

    pub fn move_unsupported(mechanism: impl Into<String>) -> Self {
        let mechanism = mechanism.into();
        Self::new(
            ErrorCode::MoveUnsupported,
            format!("Move mechanism '{}' is not implemented", mechanism),
            serde_json::json!({ "mechanism": mechanism }),
        )
        .with_hint("Run without --git and stage the result with your VCS afterwards")
    }

    pub fn class_invalid_name(name: impl Into<String>, path: Option<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::ClassInvalidName,
            format!("Invalid class name '{}'", name),
            to_details(InvalidNameDetails { name, path }),
        )
    }

    pub fn class_invalid_package(name: impl Into<String>, path: Option<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::ClassInvalidPackage,
            format!("Invalid package name '{}'", name),
            to_details(InvalidNameDetails { name, path }),
        )
    }

    pub fn source_malformed(
        path: impl Into<String>,
        rule: impl Into<String>,
        line: Option<usize>,
    ) -> Self {
        let path = path.into();
        let rule = rule.into();
        Self::new(
            ErrorCode::SourceMalformed,
            format!("Malformed source {}: {}", path, rule),
            to_details(SourceMalformedDetails { path, rule, line }),
        )
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            to_details(ConfigInvalidJsonDetails {
                path: path.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
