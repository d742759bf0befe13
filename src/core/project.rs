//! Project records — the data the showcase renders.
//!
//! Records come from a TOML file of `[[project]]` tables, or from the
//! built-in sample list when no file is given. This module performs the
//! only file parsing in the app and returns plain data; nothing here
//! touches the terminal.

use std::path::Path;

use serde::Deserialize;

/// One showcase entry. All four strings are rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    /// The record's "type" field — `kind` here because of the keyword.
    #[serde(rename = "type")]
    pub kind: String,
    pub project: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct ProjectFile {
    #[serde(default, rename = "project")]
    projects: Vec<ProjectRecord>,
}

/// Why a data file failed to load.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed project file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Load the ordered project list from `path`.
///
/// An empty file (or a file with no `[[project]]` tables) is valid and
/// yields an empty list; a missing or malformed file is an error the caller
/// surfaces at startup.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectRecord>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file: ProjectFile = toml::from_str(&text).map_err(|source| DataError::Toml {
        path: path.display().to_string(),
        source,
    })?;
    Ok(file.projects)
}

/// Built-in list used when the CLI gets no data file.
pub fn sample_projects() -> Vec<ProjectRecord> {
    let records = [
        ("Atrium", "Brand Identity", "Hotel group", "01"),
        ("Lumen Grid", "Web Experience", "Energy startup", "02"),
        ("Fieldnotes", "Editorial Design", "Travel quarterly", "03"),
        ("Northwind", "Art Direction", "Outdoor apparel", "04"),
        ("Parallax", "Interactive Installation", "Science museum", "05"),
        ("Softserve", "Packaging", "Ice-cream label", "06"),
    ];
    records
        .into_iter()
        .map(|(name, kind, project, label)| ProjectRecord {
            name: name.to_string(),
            kind: kind.to_string(),
            project: project.to_string(),
            label: label.to_string(),
        })
        .collect()
}
