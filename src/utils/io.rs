//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// What a line transform wants written in place of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutput {
    Keep,
    /// Zero or more replacement lines, each carrying its own terminator.
    Replace(Vec<String>),
    /// Write `head` in place of the first `prefix_len` bytes and keep the
    /// rest of the original line byte for byte.
    Splice { prefix_len: usize, head: String },
}

impl LineOutput {
    /// Swap out everything in `line` that precedes `tail`, a suffix of `line`.
    pub fn splice(line: &str, tail: &str, head: String) -> Self {
        LineOutput::Splice {
            prefix_len: line.len() - tail.len(),
            head,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub lines_read: usize,
    pub replaced_lines: usize,
}

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Create a directory and its parents unless it already exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("create {}", dir.display())))
        })?;
    }
    Ok(())
}

/// Stream `path` line by line through `transform` into a sibling temp file,
/// then rename it over the original.
///
/// Readers see either the old content or the new content, never a partial
/// write. With `preview` set the transform still runs on every line but
/// nothing is written.
///
/// Lines that are not valid UTF-8 reach the transform as a lossy view. Only
/// a [`LineOutput::Splice`] whose prefix is byte-identical in both views is
/// applied to such a line, so undecodable bytes after the prefix survive.
pub fn rewrite_lines<F>(path: &Path, preview: bool, mut transform: F) -> Result<RewriteOutcome>
where
    F: FnMut(&str) -> LineOutput,
{
    let shown = path.display().to_string();
    let io_err = |op: &str, e: std::io::Error| {
        Error::internal_io(e.to_string(), Some(format!("{} {}", op, shown)))
    };

    let source = File::open(path).map_err(|e| io_err("read", e))?;
    let mut reader = BufReader::new(source);

    let mut temp = if preview {
        None
    } else {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = tempfile::Builder::new()
            .prefix(".classmv-")
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(|e| io_err("create temp file for", e))?;
        Some(temp)
    };

    let mut outcome = RewriteOutcome::default();
    {
        let mut writer = temp.as_mut().map(|t| BufWriter::new(t.as_file_mut()));
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| io_err("read", e))?;
            if read == 0 {
                break;
            }
            outcome.lines_read += 1;

            let line = String::from_utf8_lossy(&buf);
            let lossy = matches!(line, Cow::Owned(_));

            let replacement = match transform(&line) {
                LineOutput::Keep => None,
                LineOutput::Replace(_) if lossy => None,
                LineOutput::Replace(lines) => Some(lines.concat().into_bytes()),
                LineOutput::Splice { prefix_len, head } => {
                    let original = buf.get(..prefix_len);
                    if original.is_some() && original == line.as_bytes().get(..prefix_len) {
                        let mut bytes = head.into_bytes();
                        bytes.extend_from_slice(&buf[prefix_len..]);
                        Some(bytes)
                    } else {
                        None
                    }
                }
            };

            if replacement.is_some() {
                outcome.replaced_lines += 1;
            }
            if let Some(writer) = writer.as_mut() {
                writer
                    .write_all(replacement.as_deref().unwrap_or(&buf))
                    .map_err(|e| io_err("write temp file for", e))?;
            }
        }

        if let Some(mut writer) = writer {
            writer.flush().map_err(|e| io_err("flush temp file for", e))?;
        }
    }

    if let Some(temp) = temp {
        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(temp.path(), meta.permissions())
                .map_err(|e| io_err("copy permissions to temp file for", e))?;
        }
        temp.persist(path)
            .map_err(|e| io_err("replace", e.error))?;
    }

    Ok(outcome)
}

/// Rename `from` to `to`, creating missing parent directories first.
pub fn relocate(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::rename(from, to).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("move {} to {}", from.display(), to.display())),
        )
    })
}
