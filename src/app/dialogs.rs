use super::*;
use crate::ui::components::dialog::{help_rows, DialogResult};

impl App {
    /// 다이얼로그 활성화 상태 확인
    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    /// 다이얼로그 닫기
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// 단축키 도움말 표시
    pub fn show_help(&mut self) {
        self.dialog = Some(DialogKind::help());
    }

    /// 병합 모드 선택 다이얼로그 열기
    pub fn open_mode_select(&mut self) {
        self.dialog = Some(DialogKind::mode_select(self.mode));
    }

    /// 도움말: 아래로 스크롤
    pub fn dialog_help_scroll_down(&mut self) {
        let max_scroll = help_rows().len().saturating_sub(1);
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            if *scroll_offset < max_scroll {
                *scroll_offset += 1;
            }
        }
    }

    /// 도움말: 위로 스크롤
    pub fn dialog_help_scroll_up(&mut self) {
        if let Some(DialogKind::Help { scroll_offset }) = &mut self.dialog {
            *scroll_offset = scroll_offset.saturating_sub(1);
        }
    }

    /// 모드 선택: 이전 항목
    pub fn dialog_mode_prev(&mut self) {
        if let Some(DialogKind::ModeSelect { selected_index }) = &mut self.dialog {
            let len = MergeMode::CHOICES.len();
            *selected_index = (*selected_index + len - 1) % len;
        }
    }

    /// 모드 선택: 다음 항목
    pub fn dialog_mode_next(&mut self) {
        if let Some(DialogKind::ModeSelect { selected_index }) = &mut self.dialog {
            *selected_index = (*selected_index + 1) % MergeMode::CHOICES.len();
        }
    }

    /// 현재 다이얼로그 확정 결과
    pub fn dialog_confirm_result(&self) -> Option<DialogResult> {
        match self.dialog.as_ref()? {
            DialogKind::ModeSelect { selected_index } => MergeMode::CHOICES
                .get(*selected_index)
                .copied()
                .map(DialogResult::ModeChosen),
            _ => Some(DialogResult::Close),
        }
    }

    /// 다이얼로그 확정 (Enter)
    pub fn confirm_dialog(&mut self) {
        let result = self.dialog_confirm_result();
        self.close_dialog();
        if let Some(DialogResult::ModeChosen(mode)) = result {
            self.set_mode(mode);
        }
    }
}
