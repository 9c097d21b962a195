//! Saving pasted exam text and loading it in one step.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::document::{ParsedDocument, parse};
use crate::template::export_file_name;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no exam content to import")]
    Empty,

    #[error("no valid questions found; check the document format")]
    NoQuestions,

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct Imported {
    pub path: PathBuf,
    pub document: ParsedDocument,
}

/// Validates `content` as an exam, then writes it into `export_dir`.
///
/// Nothing is written unless the text parses to at least one question.
pub fn import(
    content: &str,
    subject: Option<&str>,
    export_dir: &Path,
) -> Result<Imported, ImportError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ImportError::Empty);
    }

    let document = parse(content);
    if document.is_empty() {
        return Err(ImportError::NoQuestions);
    }

    let path = export_dir.join(export_file_name(subject));
    fs::create_dir_all(export_dir)
        .and_then(|()| fs::write(&path, content))
        .map_err(|source| ImportError::Save {
            path: path.clone(),
            source,
        })?;

    info!(
        path = %path.display(),
        questions = document.questions.len(),
        "imported exam document"
    );
    Ok(Imported { path, document })
}
