//! 병합 작업 모델
//!
//! 병합 모드, 워커 요청/이벤트, 진행 상태 정의

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 병합 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// 미선택 (빈 자리표시)
    #[default]
    Unset,
    /// 모든 행을 하나의 시트로 쌓기
    Workbook,
    /// 입력 파일마다 별도 시트
    Worksheet,
}

impl MergeMode {
    /// 모드 선택 목록 (빈 자리표시 포함, 원래 순서)
    pub const CHOICES: [MergeMode; 3] = [MergeMode::Unset, MergeMode::Workbook, MergeMode::Worksheet];

    /// 표시 이름
    pub fn label(&self) -> &'static str {
        match self {
            MergeMode::Unset => " ",
            MergeMode::Workbook => "Workbook",
            MergeMode::Worksheet => "Worksheet",
        }
    }

    /// 다음 모드로 순환 (Unset → Workbook → Worksheet → Unset)
    pub fn next(self) -> Self {
        match self {
            MergeMode::Unset => MergeMode::Workbook,
            MergeMode::Workbook => MergeMode::Worksheet,
            MergeMode::Worksheet => MergeMode::Unset,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, MergeMode::Unset)
    }

    /// CHOICES 내 인덱스
    pub fn choice_index(&self) -> usize {
        Self::CHOICES.iter().position(|m| m == self).unwrap_or(0)
    }
}

/// 워커에 전달되는 병합 요청 (대기열의 불변 스냅샷)
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub files: Vec<PathBuf>,
    pub mode: MergeMode,
    pub output_path: PathBuf,
}

/// 병합 최종 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// 성공 (저장된 절대 경로)
    Success { output_path: PathBuf },
    /// 실패 (원인 문자열)
    Failure { error: String },
}

impl MergeOutcome {
    /// 상태줄에 표시할 최종 메시지
    pub fn message(&self) -> String {
        match self {
            MergeOutcome::Success { output_path } => format!(
                "Excel files merged successfully. Merged data saved to {}",
                output_path.display()
            ),
            MergeOutcome::Failure { error } => format!("Error merging files: {}", error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MergeOutcome::Success { .. })
    }
}

/// 워커 → 메인 루프 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    /// 파일 하나 로드 완료 후 진행률
    Progress {
        loaded: usize,
        total: usize,
        percent: u8,
        current_file: String,
    },
    /// 최종 결과 (정확히 한 번)
    Finished(MergeOutcome),
}

/// 로드 진행률 (0-100, 내림)
pub fn load_percentage(loaded: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((loaded.min(total) * 100) / total) as u8
}

/// 진행 상태 (UI 표시용)
#[derive(Debug, Clone, Default)]
pub struct MergeProgress {
    /// 마지막으로 로드한 파일
    pub current_file: String,
    /// 로드 완료된 파일 수
    pub files_loaded: usize,
    /// 전체 파일 수
    pub total_files: usize,
    /// 진행률 (0-100)
    pub percent: u8,
}

impl MergeProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            ..Self::default()
        }
    }

    /// 진행 이벤트 반영
    pub fn apply(&mut self, loaded: usize, total: usize, percent: u8, current_file: String) {
        self.files_loaded = loaded;
        self.total_files = total;
        self.percent = percent;
        self.current_file = current_file;
    }
}
