//! Inputs of one clean-and-upload run.

use std::path::PathBuf;

use xlmerge_sql::DatabaseConfig;

/// Everything a clean-and-upload run needs, gathered up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Folder holding the `.xlsx` files to merge.
    pub folder: PathBuf,
    /// Destination of the cleaned spreadsheet.
    pub cleaned_path: PathBuf,
    /// Destination table name.
    pub table_name: String,
    pub database: DatabaseConfig,
}

impl Session {
    /// Names of required fields left empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.folder.as_os_str().is_empty() {
            missing.push("folder");
        }
        if self.cleaned_path.as_os_str().is_empty() {
            missing.push("output file");
        }
        if self.table_name.trim().is_empty() {
            missing.push("table name");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields() {
        let session = Session {
            folder: PathBuf::new(),
            cleaned_path: PathBuf::from("out.xlsx"),
            table_name: "  ".to_string(),
            database: DatabaseConfig::new("x.db"),
        };
        assert_eq!(session.missing_fields(), vec!["folder", "table name"]);
    }
}
