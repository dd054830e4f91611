use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::annotation::Annotation;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid annotations file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk annotation list: a TOML document of `[[annotations]]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationFile {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// Read the raw text to be annotated
pub fn read_source(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Read and parse an annotations file
pub fn read_annotations(
    relative_path: &RelativePath,
    root: &Path,
) -> Result<Vec<Annotation>, IoError> {
    let content = read_source(relative_path, root)?;
    let file: AnnotationFile = toml::from_str(&content).map_err(|source| IoError::Parse {
        path: relative_path.to_path(root),
        source,
    })?;
    Ok(file.annotations)
}

/// Write rendered markup, creating parent directories as needed
pub fn write_markup(
    relative_path: &RelativePath,
    root: &Path,
    markup: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, markup).map_err(IoError::Io)
}

/// Annotations file conventionally stored next to a source text:
/// `notes/doc.txt` pairs with `notes/doc.annotations.toml`.
pub fn annotations_sidecar(source: &RelativePath) -> RelativePathBuf {
    source.with_extension("annotations.toml")
}
