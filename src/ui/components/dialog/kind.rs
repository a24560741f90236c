use crate::models::operation::MergeMode;

/// 다이얼로그 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// 에러 다이얼로그
    Error { title: String, message: String },
    /// 메시지 다이얼로그 (정보 표시)
    Message { title: String, message: String },
    /// 단축키 도움말 다이얼로그
    Help { scroll_offset: usize },
    /// 병합 모드 선택 (빈 자리표시 / Workbook / Worksheet)
    ModeSelect { selected_index: usize },
}

impl DialogKind {
    /// 새 에러 다이얼로그 생성
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    /// 새 메시지 다이얼로그 생성
    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
        }
    }

    /// 단축키 도움말 다이얼로그
    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }

    /// 모드 선택 다이얼로그 (현재 모드에 커서)
    pub fn mode_select(current: MergeMode) -> Self {
        DialogKind::ModeSelect {
            selected_index: current.choice_index(),
        }
    }
}

/// 다이얼로그 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// 닫기
    Close,
    /// 모드 선택 확정
    ModeChosen(MergeMode),
}
