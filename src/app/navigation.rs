use super::*;

impl App {
    /// 탐색/선택 액션 실행 (활성 패널 기준)
    pub(super) fn execute_navigation(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.move_selection_up(),
            Action::MoveDown => self.move_selection_down(),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),
            Action::GoToParent => self.go_to_parent(),
            Action::EnterSelected => self.enter_selected(),
            Action::ToggleSelection => self.toggle_selection_and_move_down(),
            Action::SelectAll => self.select_all(),
            Action::DeselectAll => self.picker.clear_marks(),
            Action::ToggleExcelFilter => self.toggle_excel_filter(),
            Action::ToggleHidden => self.toggle_hidden(),
            Action::Refresh => self.refresh_current(),
            _ => {}
        }
    }

    /// 커서 위로
    pub fn move_selection_up(&mut self) {
        match self.active_panel() {
            ActivePanel::Picker => self.picker.cursor_up(),
            ActivePanel::Queue => self.queue.cursor_up(),
        }
        self.sync_scroll();
    }

    /// 커서 아래로
    pub fn move_selection_down(&mut self) {
        match self.active_panel() {
            ActivePanel::Picker => self.picker.cursor_down(),
            ActivePanel::Queue => self.queue.cursor_down(),
        }
        self.sync_scroll();
    }

    pub fn go_to_top(&mut self) {
        match self.active_panel() {
            ActivePanel::Picker => self.picker.cursor_top(),
            ActivePanel::Queue => self.queue.cursor_top(),
        }
        self.sync_scroll();
    }

    pub fn go_to_bottom(&mut self) {
        match self.active_panel() {
            ActivePanel::Picker => self.picker.cursor_bottom(),
            ActivePanel::Queue => self.queue.cursor_bottom(),
        }
        self.sync_scroll();
    }

    /// 화면 높이에 맞춰 두 패널의 스크롤 보정
    pub fn sync_scroll(&mut self) {
        let picker_height = self.layout.panel_list_height(ActivePanel::Picker);
        let queue_height = self.layout.panel_list_height(ActivePanel::Queue);
        self.picker.adjust_scroll(picker_height);
        self.queue.adjust_scroll(queue_height);
    }

    /// 상위 디렉토리로 이동 (떠난 디렉토리에 커서)
    pub fn go_to_parent(&mut self) {
        if self.active_panel() != ActivePanel::Picker {
            return;
        }
        let Some(parent) = self.picker.current_path.parent().map(std::path::Path::to_path_buf) else {
            return;
        };
        let previous_name = self.picker.current_dir_name();

        match self.picker.change_directory(parent, &self.filesystem) {
            Ok(()) => {
                if let Some(name) = previous_name {
                    self.picker.focus_name(&name);
                }
                self.sync_scroll();
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    /// 커서 항목 열기: 디렉토리는 진입, 파일은 대기열에 추가
    pub fn enter_selected(&mut self) {
        if self.active_panel() != ActivePanel::Picker {
            return;
        }
        if self.picker.is_parent_row_selected() {
            self.go_to_parent();
            return;
        }
        let Some(entry) = self.picker.selected_entry() else {
            return;
        };

        if entry.is_directory() {
            let path = entry.path.clone();
            match self.picker.change_directory(path, &self.filesystem) {
                Ok(()) => self.sync_scroll(),
                Err(err) => self.set_status(err.to_string(), StatusKind::Error),
            }
        } else {
            self.add_chosen_files();
        }
    }

    /// 커서 파일 표시 토글 후 다음 줄로
    pub fn toggle_selection_and_move_down(&mut self) {
        if self.active_panel() != ActivePanel::Picker {
            return;
        }
        self.picker.toggle_mark();
        self.picker.cursor_down();
        self.sync_scroll();
    }

    /// 현재 디렉토리의 모든 파일 표시
    pub fn select_all(&mut self) {
        self.picker.mark_all_files();
        let count = self.picker.marked.len();
        self.set_status(
            format!(
                "{} marked",
                crate::utils::formatter::pluralize(count, "file", "files")
            ),
            StatusKind::Info,
        );
    }

    /// "Excel Files" / "All Files" 필터 전환
    pub fn toggle_excel_filter(&mut self) {
        self.picker.excel_only = !self.picker.excel_only;
        self.refresh_current();
        let label = if self.picker.excel_only {
            "Showing Excel files"
        } else {
            "Showing all files"
        };
        self.set_status(label, StatusKind::Info);
    }

    /// 숨김 파일 표시 전환
    pub fn toggle_hidden(&mut self) {
        self.picker.show_hidden = !self.picker.show_hidden;
        self.refresh_current();
    }

    /// 현재 디렉토리 다시 읽기 (커서 항목 유지)
    pub fn refresh_current(&mut self) {
        let focused = self.picker.selected_entry().map(|entry| entry.name.clone());
        if let Err(err) = self.picker.refresh(&self.filesystem) {
            self.set_status(err.to_string(), StatusKind::Error);
            return;
        }
        if let Some(name) = focused {
            self.picker.focus_name(&name);
        }
        self.sync_scroll();
    }
}
