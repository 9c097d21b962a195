//! Where exam documents come from: files on disk and the named catalog.

mod catalog;
mod loader;

pub use catalog::{Catalog, CatalogError};
pub use loader::{LoadError, load_document};
