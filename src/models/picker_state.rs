use crate::models::file_entry::FileEntry;
use crate::system::filesystem::FileSystem;
use crate::utils::error::Result;
use std::collections::HashSet;
use std::path::PathBuf;

/// 파일 선택 패널 상태
///
/// 현재 디렉토리에 상위 디렉토리가 있으면 화면 첫 줄(인덱스 0)은 ".." 항목이다.
/// `selected_index` 는 ".." 를 포함한 화면 인덱스, `marked` 는 `entries` 인덱스다.
#[derive(Debug, Clone)]
pub struct PickerState {
    /// 현재 경로
    pub current_path: PathBuf,
    /// 파일 목록 (디렉토리 먼저, 이름순)
    pub entries: Vec<FileEntry>,
    /// 커서 위치 (화면 인덱스)
    pub selected_index: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
    /// 표시된 파일 (entries 인덱스)
    pub marked: HashSet<usize>,
    /// 숨김 파일 표시 여부
    pub show_hidden: bool,
    /// 스프레드시트 파일만 표시
    pub excel_only: bool,
}

impl PickerState {
    pub fn new(path: PathBuf) -> Self {
        Self {
            current_path: path,
            entries: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            marked: HashSet::new(),
            show_hidden: false,
            excel_only: true,
        }
    }

    /// 파일 목록 새로고침
    ///
    /// 필터가 바뀌면 인덱스가 무효화되므로 표시도 초기화한다.
    pub fn refresh(&mut self, filesystem: &FileSystem) -> Result<()> {
        let mut entries = filesystem.read_directory(&self.current_path)?;

        if !self.show_hidden {
            entries.retain(|entry| !entry.is_hidden);
        }
        if self.excel_only {
            entries.retain(|entry| entry.is_directory() || entry.is_spreadsheet());
        }

        entries.sort_by(|a, b| {
            b.is_directory()
                .cmp(&a.is_directory())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        self.entries = entries;
        self.marked.clear();

        let total = self.total_rows();
        if self.selected_index >= total {
            self.selected_index = total.saturating_sub(1);
        }
        Ok(())
    }

    /// 경로 변경. 실패하면 이전 상태를 유지한다.
    pub fn change_directory(&mut self, path: PathBuf, filesystem: &FileSystem) -> Result<()> {
        let previous = std::mem::replace(&mut self.current_path, path);
        let previous_index = self.selected_index;
        self.selected_index = 0;
        self.scroll_offset = 0;
        if let Err(err) = self.refresh(filesystem) {
            self.current_path = previous;
            self.selected_index = previous_index;
            return Err(err);
        }
        Ok(())
    }

    /// 상위 디렉토리 존재 여부 (".." 항목 표시)
    pub fn has_parent(&self) -> bool {
        self.current_path.parent().is_some()
    }

    /// ".." 를 포함한 전체 줄 수
    pub fn total_rows(&self) -> usize {
        self.entries.len() + usize::from(self.has_parent())
    }

    /// 화면 인덱스 → entries 인덱스 (".." 이면 None)
    fn entry_index(&self, row: usize) -> Option<usize> {
        if self.has_parent() {
            row.checked_sub(1)
        } else {
            Some(row)
        }
    }

    /// 커서가 ".." 위에 있는지
    pub fn is_parent_row_selected(&self) -> bool {
        self.has_parent() && self.selected_index == 0
    }

    /// 커서 항목
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.entry_index(self.selected_index)
            .and_then(|idx| self.entries.get(idx))
    }

    /// 이름으로 커서 이동 (상위 디렉토리 복귀 시 사용)
    pub fn focus_name(&mut self, name: &str) {
        if let Some(idx) = self.entries.iter().position(|e| e.name == name) {
            self.selected_index = idx + usize::from(self.has_parent());
        }
    }

    pub fn cursor_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.selected_index + 1 < self.total_rows() {
            self.selected_index += 1;
        }
    }

    pub fn cursor_top(&mut self) {
        self.selected_index = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.selected_index = self.total_rows().saturating_sub(1);
    }

    /// 커서 파일 표시 토글. 디렉토리와 ".." 는 표시하지 않는다.
    pub fn toggle_mark(&mut self) -> bool {
        let Some(idx) = self.entry_index(self.selected_index) else {
            return false;
        };
        let Some(entry) = self.entries.get(idx) else {
            return false;
        };
        if entry.is_directory() {
            return false;
        }
        if !self.marked.remove(&idx) {
            self.marked.insert(idx);
        }
        true
    }

    /// 모든 파일 표시
    pub fn mark_all_files(&mut self) {
        self.marked = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_directory())
            .map(|(idx, _)| idx)
            .collect();
    }

    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    /// 대기열에 추가할 경로
    ///
    /// 표시된 파일이 있으면 목록 순서대로, 없으면 커서 파일 하나.
    pub fn chosen_paths(&self) -> Vec<PathBuf> {
        if !self.marked.is_empty() {
            return self
                .entries
                .iter()
                .enumerate()
                .filter(|(idx, _)| self.marked.contains(idx))
                .map(|(_, entry)| entry.path.clone())
                .collect();
        }
        match self.selected_entry() {
            Some(entry) if !entry.is_directory() => vec![entry.path.clone()],
            _ => Vec::new(),
        }
    }

    /// 화면 높이에 맞춰 스크롤 오프셋 조정
    pub fn adjust_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index + 1 - visible_height;
        }
    }

    /// 현재 디렉토리 이름 (상위 복귀 시 포커스 용)
    pub fn current_dir_name(&self) -> Option<String> {
        self.current_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
    }
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PickerState) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.xlsx"), b"").unwrap();
        fs::write(temp.path().join("a.xls"), b"").unwrap();
        fs::write(temp.path().join("notes.txt"), b"").unwrap();
        fs::write(temp.path().join(".hidden.xlsx"), b"").unwrap();
        fs::create_dir(temp.path().join("zdir")).unwrap();

        let mut state = PickerState::new(temp.path().to_path_buf());
        state.refresh(&FileSystem::new()).unwrap();
        (temp, state)
    }

    fn names(state: &PickerState) -> Vec<&str> {
        state.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_refresh_sorts_dirs_first_and_filters() {
        let (_temp, state) = setup();
        assert_eq!(names(&state), vec!["zdir", "a.xls", "b.xlsx"]);
    }

    #[test]
    fn test_excel_filter_off_shows_all_files() {
        let (_temp, mut state) = setup();
        state.excel_only = false;
        state.refresh(&FileSystem::new()).unwrap();
        assert_eq!(names(&state), vec!["zdir", "a.xls", "b.xlsx", "notes.txt"]);

        state.show_hidden = true;
        state.refresh(&FileSystem::new()).unwrap();
        assert_eq!(state.entries.len(), 5);
    }

    #[test]
    fn test_parent_row_occupies_first_line() {
        let (_temp, mut state) = setup();
        assert!(state.is_parent_row_selected());
        assert!(state.selected_entry().is_none());
        assert_eq!(state.total_rows(), 4);

        state.cursor_down();
        assert_eq!(state.selected_entry().map(|e| e.name.as_str()), Some("zdir"));
    }

    #[test]
    fn test_toggle_mark_skips_directories() {
        let (_temp, mut state) = setup();
        state.selected_index = 1; // zdir
        assert!(!state.toggle_mark());
        state.selected_index = 0; // ..
        assert!(!state.toggle_mark());
        assert!(state.marked.is_empty());
    }

    #[test]
    fn test_chosen_paths_marked_in_listing_order() {
        let (temp, mut state) = setup();
        state.selected_index = 3; // b.xlsx
        assert!(state.toggle_mark());
        state.selected_index = 2; // a.xls
        assert!(state.toggle_mark());

        assert_eq!(
            state.chosen_paths(),
            vec![temp.path().join("a.xls"), temp.path().join("b.xlsx")]
        );
    }

    #[test]
    fn test_chosen_paths_falls_back_to_cursor() {
        let (temp, mut state) = setup();
        state.selected_index = 3;
        assert_eq!(state.chosen_paths(), vec![temp.path().join("b.xlsx")]);

        state.selected_index = 1;
        assert!(state.chosen_paths().is_empty());
    }

    #[test]
    fn test_mark_all_files_and_clear() {
        let (_temp, mut state) = setup();
        state.mark_all_files();
        assert_eq!(state.marked.len(), 2);
        assert!(!state.marked.contains(&0));
        state.clear_marks();
        assert!(state.marked.is_empty());
    }

    #[test]
    fn test_change_directory_failure_keeps_state() {
        let (temp, mut state) = setup();
        state.selected_index = 2;
        let result = state.change_directory(temp.path().join("missing"), &FileSystem::new());
        assert!(result.is_err());
        assert_eq!(state.current_path, temp.path());
        assert_eq!(state.selected_index, 2);
    }

    #[test]
    fn test_focus_name_accounts_for_parent_row() {
        let (_temp, mut state) = setup();
        state.focus_name("b.xlsx");
        assert_eq!(state.selected_index, 3);
    }
}
