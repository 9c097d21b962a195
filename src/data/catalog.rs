use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::loader::{LoadError, load_document};

const BUILTIN_EXAMS: &[(&str, &str)] = &[
    ("mathematics", include_str!("../../exams/mathematics.md")),
    ("rust-basics", include_str!("../../exams/rust-basics.md")),
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no exam named '{name}' (try `mock-exam list`)")]
    UnknownExam { name: String },

    #[error("failed to scan catalog directory {}: {source}", dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Clone)]
enum Entry {
    Builtin(&'static str),
    File(PathBuf),
}

/// Exams available by name.
///
/// Built-in exams ship inside the binary. A catalog directory adds one exam
/// per `*.md` file, named after the file stem; a file can shadow a built-in.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: BTreeMap<String, Entry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let entries = BUILTIN_EXAMS
            .iter()
            .map(|(name, content)| (name.to_string(), Entry::Builtin(content)))
            .collect();
        Self { entries }
    }

    /// Built-in exams plus the documents in `dir`, if given.
    pub fn load(dir: Option<&Path>) -> Result<Self, CatalogError> {
        let mut catalog = Self::builtin();
        if let Some(dir) = dir {
            catalog.add_dir(dir)?;
        }
        Ok(catalog)
    }

    fn add_dir(&mut self, dir: &Path) -> Result<(), CatalogError> {
        let scan_error = |source| CatalogError::Scan {
            dir: dir.to_path_buf(),
            source,
        };

        for entry in fs::read_dir(dir).map_err(scan_error)? {
            let path = entry.map_err(scan_error)?.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!(path = %path.display(), "skipping exam with non-UTF-8 name");
                continue;
            };

            debug!(name, path = %path.display(), "catalog entry");
            self.entries.insert(name.to_string(), Entry::File(path.clone()));
        }
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Document text of the exam called `name`.
    pub fn get(&self, name: &str) -> Result<String, CatalogError> {
        match self.entries.get(name) {
            Some(Entry::Builtin(content)) => Ok((*content).to_string()),
            Some(Entry::File(path)) => Ok(load_document(path)?),
            None => Err(CatalogError::UnknownExam {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{pair_by_position, parse};

    #[test]
    fn builtin_exams_are_complete_documents() {
        let catalog = Catalog::builtin();
        for name in catalog.names() {
            let items = pair_by_position(parse(&catalog.get(name).unwrap()));
            assert!(!items.is_empty(), "{name} has no questions");
            for item in &items {
                let answer = item.answer.as_ref().expect("every question keyed");
                assert_eq!(item.question.options.len(), 4);
                assert!(item.question.has_option(answer.correct));
            }
        }
    }

    #[test]
    fn mathematics_has_fifteen_questions() {
        let content = Catalog::builtin().get("mathematics").unwrap();
        let parsed = parse(&content);
        assert_eq!(parsed.questions.len(), 15);
        assert_eq!(parsed.answers.len(), 15);
    }

    #[test]
    fn directory_entries_are_added_by_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("history.md"), "1. Q\na) x\n---\n1.  a) x || y").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = Catalog::load(Some(dir.path())).unwrap();
        assert!(catalog.contains("history"));
        assert!(catalog.contains("mathematics"));
        assert!(!catalog.contains("notes"));
        assert!(catalog.get("history").unwrap().starts_with("1. Q"));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = Catalog::builtin().get("astrology").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownExam { .. }));
    }

    #[test]
    fn missing_directory_is_a_scan_error() {
        let err = Catalog::load(Some(Path::new("/no/such/catalog"))).unwrap_err();
        assert!(matches!(err, CatalogError::Scan { .. }));
    }
}
