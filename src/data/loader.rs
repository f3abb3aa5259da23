//! Reads and decodes exam files from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::data::parser::{self, ParseError, Parsed, Strictness};

/// Errors raised while reading, decoding, or parsing an exam file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("exam file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("{path} is not valid {encoding}; try --encoding with another label (e.g. latin1)")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error(
        "unknown encoding label {label:?}; labels follow the WHATWG registry (utf-8, latin1, shift_jis, ...)"
    )]
    UnknownEncoding { label: String },

    #[error("{path}: {source}")]
    Format {
        path: PathBuf,
        source: ParseError,
    },
}

/// Options controlling how an exam file is read and parsed.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Encoding label override; UTF-8 when unset.
    pub encoding: Option<String>,
    pub strictness: Strictness,
}

/// Load an exam file into a question bank. Parser warnings are logged
/// against the file path; only format and IO problems are errors.
pub fn load_questions_from_path(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Parsed, LoadError> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let text = decode(&bytes, options.encoding.as_deref(), path)?;
    let parsed = parser::parse(&text, options.strictness).map_err(|source| LoadError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    for warning in &parsed.warnings {
        warn!("{}: {warning}", path.display());
    }

    Ok(parsed)
}

fn decode(bytes: &[u8], label: Option<&str>, path: &Path) -> Result<String, LoadError> {
    let encoding = match label {
        None => encoding_rs::UTF_8,
        Some(label) => encoding_rs::Encoding::for_label(label.as_bytes()).ok_or_else(|| {
            LoadError::UnknownEncoding {
                label: label.to_string(),
            }
        })?,
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| LoadError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;

    let mut text = text.into_owned();
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}
