//! Spreadsheet file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Extension of the spreadsheet files picked up from a folder.
pub const SPREADSHEET_EXTENSION: &str = "xlsx";

/// Lists all `.xlsx` files directly inside a directory.
///
/// Returns files sorted by filename. Office lock files (`~$name.xlsx`) are
/// skipped.
pub fn list_spreadsheet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let read_err = |source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_spreadsheet(&path) && !is_lock_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SPREADSHEET_EXTENSION))
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("~$"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &[
            "b_sales.xlsx",
            "a_sales.XLSX",
            "~$a_sales.xlsx",
            "notes.csv",
            "legacy.xls",
        ] {
            std::fs::write(dir.path().join(name), b"not really a workbook").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.xlsx")).unwrap();
        dir
    }

    #[test]
    fn test_list_spreadsheet_files() {
        let dir = create_test_dir();
        let files = list_spreadsheet_files(dir.path()).unwrap();

        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a_sales.XLSX", "b_sales.xlsx"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = list_spreadsheet_files(&missing).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_lock_file_detection() {
        assert!(is_lock_file(Path::new("/tmp/~$report.xlsx")));
        assert!(!is_lock_file(Path::new("/tmp/report.xlsx")));
    }
}
