use crate::models::file_entry::{FileEntry, FileType};
use crate::utils::error::{Result, SheetMergeError};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

/// 파일 시스템 모듈
pub struct FileSystem;

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 읽기
    ///
    /// 주어진 경로의 디렉토리를 읽어서 파일 엔트리 리스트를 반환합니다.
    /// 메타데이터를 읽을 수 없는 항목은 건너뜁니다.
    pub fn read_directory(&self, path: &Path) -> Result<Vec<FileEntry>> {
        if !path.exists() {
            return Err(SheetMergeError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(SheetMergeError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                SheetMergeError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                SheetMergeError::Io(e)
            }
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();
            let Ok(link_metadata) = fs::symlink_metadata(&entry_path) else {
                continue;
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = Self::file_type(&link_metadata);

            // symlink는 대상 메타데이터 우선
            let metadata = if file_type == FileType::Symlink {
                fs::metadata(&entry_path).unwrap_or(link_metadata)
            } else {
                link_metadata
            };

            let size = if metadata.is_file() { metadata.len() } else { 0 };
            let modified = metadata
                .modified()
                .unwrap_or_else(|_| std::time::SystemTime::now());
            let is_hidden = name.starts_with('.');

            entries.push(FileEntry::new(
                name, entry_path, file_type, size, modified, is_hidden,
            ));
        }

        Ok(entries)
    }

    fn file_type(metadata: &Metadata) -> FileType {
        if metadata.is_dir() {
            FileType::Directory
        } else if metadata.is_symlink() {
            FileType::Symlink
        } else {
            FileType::File
        }
    }

    /// 홈 디렉토리
    pub fn home_dir() -> Result<PathBuf> {
        dirs::home_dir().ok_or(SheetMergeError::HomeDirUnavailable)
    }

    /// 병합 결과 저장 위치 (`<home>/Downloads`)
    pub fn downloads_dir() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("Downloads"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_directory_lists_files_and_dirs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.xlsx"), b"stub").unwrap();
        fs::write(temp.path().join(".hidden"), b"").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let fs_module = FileSystem::new();
        let mut entries = fs_module.read_directory(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, ".hidden");
        assert!(entries[0].is_hidden);
        assert_eq!(entries[1].name, "a.xlsx");
        assert_eq!(entries[1].size, 4);
        assert_eq!(entries[1].file_type, FileType::File);
        assert_eq!(entries[2].name, "sub");
        assert!(entries[2].is_directory());
    }

    #[test]
    fn test_read_directory_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = FileSystem::new().read_directory(&missing).unwrap_err();
        assert!(matches!(err, SheetMergeError::PathNotFound { .. }));
    }

    #[test]
    fn test_read_directory_on_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        let err = FileSystem::new().read_directory(&file).unwrap_err();
        assert!(matches!(err, SheetMergeError::NotADirectory { .. }));
    }
}
