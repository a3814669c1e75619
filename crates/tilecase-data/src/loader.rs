//! Format detection (RON/JSON/TOML), case file discovery, and
//! deserialization.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tilecase_core::CaseOptions;

use crate::schema::CaseFile;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading cases or configuration.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A configuration file names a rule that does not exist.
    #[error("unknown validation rule '{name}' in {file}")]
    UnknownRule { file: PathBuf, name: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Discovery
// ===========================================================================

/// List the case files directly inside `dir`, sorted by path.
///
/// Files whose extension is not a supported format are skipped.
pub fn find_case_files(dir: &Path) -> Result<Vec<PathBuf>, DataLoadError> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && detect_format(&path).is_ok() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format (detected from
/// extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(file = %path.display(), ?format, bytes = content.len(), "loading data file");
    deserialize_str(&content, format, path)
}

/// Deserialize `content` as `format`. `path` is only used for error
/// reporting.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    path: &Path,
) -> Result<T, DataLoadError> {
    let parse_error = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Load a case file and flatten it into [`CaseOptions`].
pub fn load_case(path: &Path) -> Result<CaseOptions, DataLoadError> {
    let file: CaseFile = deserialize_file(path)?;
    let options = file.into_options();
    tracing::debug!(
        case = %options.name,
        tiles = options.terrain_tiles.len(),
        structures = options.structure_tiles.len(),
        "case loaded"
    );
    Ok(options)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tilecase_core::test_utils::*;
    use tilecase_core::validate_case;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tilecase_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const JSON_CASE: &str = r#"{
        "name": "grid project",
        "grid_size": [2, 2, 1],
        "terrain": [[{}, {}], [{}, {}]],
        "system": { "components": [{ "name": "biomass" }] },
        "structures": [
            { "data": { "name": "biomass" }, "texture": { "size": [0, 0] }, "position": [0, 0] }
        ]
    }"#;

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_known() {
        assert_eq!(detect_format(Path::new("a.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("a.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("a.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("case.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("case")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_case_files
    // -----------------------------------------------------------------------

    #[test]
    fn find_case_files_sorted_and_filtered() {
        let dir = make_test_dir("find");
        fs::write(dir.join("b.json"), "{}").unwrap();
        fs::write(dir.join("a.ron"), "()").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::create_dir_all(dir.join("nested.json")).unwrap();

        let found = find_case_files(&dir).unwrap();
        assert_eq!(found, vec![dir.join("a.ron"), dir.join("b.json")]);

        cleanup(&dir);
    }

    #[test]
    fn find_case_files_missing_dir() {
        let result = find_case_files(Path::new("/definitely/not/a/tilecase/dir"));
        assert!(matches!(result, Err(DataLoadError::Io(_))));
    }

    // -----------------------------------------------------------------------
    // load_case
    // -----------------------------------------------------------------------

    #[test]
    fn load_case_json() {
        let dir = make_test_dir("load_json");
        let path = dir.join("grid.json");
        fs::write(&path, JSON_CASE).unwrap();

        let options = load_case(&path).unwrap();
        assert_eq!(options.name, "grid project");
        assert_eq!(options.grid_size, pos3(2, 2, 1));
        assert!(validate_case(&options).is_valid());

        cleanup(&dir);
    }

    #[test]
    fn load_case_parse_error_names_file() {
        let dir = make_test_dir("load_bad");
        let path = dir.join("bad.json");
        fs::write(&path, r#"{"name": "bad", "grid_size": [1.5, 2]}"#).unwrap();

        let err = load_case(&path).unwrap_err();
        match err {
            DataLoadError::Parse { file, .. } => assert_eq!(file, path),
            other => panic!("expected parse error, got {other:?}"),
        }

        cleanup(&dir);
    }

    #[test]
    fn load_case_missing_file() {
        let result = load_case(Path::new("/definitely/not/here.ron"));
        assert!(matches!(result, Err(DataLoadError::Io(_))));
    }

    #[test]
    fn load_bundled_cases() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cases");
        let files = find_case_files(&dir).unwrap();
        assert!(!files.is_empty());

        for path in files {
            let options = load_case(&path).unwrap();
            let report = validate_case(&options);
            let expect_valid = path
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.starts_with("valid_"));
            assert_eq!(report.is_valid(), expect_valid, "{}: {report}", path.display());
        }
    }
}
