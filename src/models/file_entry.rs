use std::path::PathBuf;
use std::time::SystemTime;

/// 병합 입력으로 인식하는 스프레드시트 확장자 (소문자)
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 파일 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// 디렉토리
    Directory,
    /// 일반 파일
    File,
    /// 심볼릭 링크
    Symlink,
}

/// 파일 선택기에 표시되는 항목
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// 파일/디렉토리 이름
    pub name: String,
    /// 전체 경로
    pub path: PathBuf,
    /// 파일 타입
    pub file_type: FileType,
    /// 바이트 단위 크기 (디렉토리는 0)
    pub size: u64,
    /// 수정 시간
    pub modified: SystemTime,
    /// 숨김 파일 여부
    pub is_hidden: bool,
}

impl FileEntry {
    pub fn new(
        name: String,
        path: PathBuf,
        file_type: FileType,
        size: u64,
        modified: SystemTime,
        is_hidden: bool,
    ) -> Self {
        Self {
            name,
            path,
            file_type,
            size,
            modified,
            is_hidden,
        }
    }

    /// 디렉토리 여부 (디렉토리를 가리키는 링크 포함)
    pub fn is_directory(&self) -> bool {
        match self.file_type {
            FileType::Directory => true,
            FileType::Symlink => self.path.is_dir(),
            FileType::File => false,
        }
    }

    /// 스프레드시트 확장자 여부
    pub fn is_spreadsheet(&self) -> bool {
        !self.is_directory() && has_spreadsheet_extension(&self.name)
    }
}

/// 이름의 확장자가 스프레드시트 형식인지 확인 (대소문자 무시)
pub fn has_spreadsheet_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            SPREADSHEET_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}
