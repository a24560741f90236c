use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetMergeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    SpreadsheetRead {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("{} contains no sheets", path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("Failed to write spreadsheet: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Home directory could not be determined")]
    HomeDirUnavailable,

    #[error("Merge mode is not selected")]
    ModeNotSelected,

    #[error("Merge worker thread panicked")]
    WorkerPanicked,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SheetMergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_include_path() {
        let err = SheetMergeError::EmptyWorkbook {
            path: PathBuf::from("/tmp/empty.xlsx"),
        };
        assert_eq!(err.to_string(), "/tmp/empty.xlsx contains no sheets");

        let err = SheetMergeError::NotADirectory {
            path: PathBuf::from("/tmp/file.txt"),
        };
        assert!(err.to_string().contains("/tmp/file.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SheetMergeError = io.into();
        assert!(matches!(err, SheetMergeError::Io(_)));
        assert_eq!(err.to_string(), "IO error: missing");
    }
}
