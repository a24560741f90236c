//! 병합 대기열
//!
//! 사용자가 선택한 순서대로 입력 파일 경로를 보관한다.
//! 중복 제거나 존재 여부 검증은 하지 않는다 (읽기 단계에서 실패로 드러난다).

use crate::utils::path_display::base_name;
use std::path::PathBuf;

/// 이동 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// 병합 대기열 상태
#[derive(Debug, Clone, Default)]
pub struct MergeQueue {
    /// 입력 파일 경로 (선택 순서)
    paths: Vec<PathBuf>,
    /// 커서 위치
    selected_index: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
}

impl MergeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 경로들을 끝에 추가 (중복 허용)
    pub fn add_files<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let before = self.paths.len();
        self.paths.extend(paths);
        self.paths.len() - before
    }

    /// 인접 항목과 위치 교환. 경계에서는 아무것도 하지 않는다.
    ///
    /// 이동했으면 `true`를 반환하고 커서는 이동한 항목을 따라간다.
    pub fn move_item(&mut self, index: usize, direction: MoveDirection) -> bool {
        if index >= self.paths.len() {
            return false;
        }
        let target = match direction {
            MoveDirection::Up => {
                if index == 0 {
                    return false;
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 >= self.paths.len() {
                    return false;
                }
                index + 1
            }
        };
        self.paths.swap(index, target);
        self.selected_index = target;
        true
    }

    /// 항목 삭제. 잘못된 인덱스면 `None`.
    pub fn delete(&mut self, index: usize) -> Option<PathBuf> {
        if index >= self.paths.len() {
            return None;
        }
        let removed = self.paths.remove(index);
        self.clamp_cursor();
        Some(removed)
    }

    /// 전체 비우기
    pub fn clear(&mut self) {
        self.paths.clear();
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// 커서 항목 위로 이동
    pub fn move_selected_up(&mut self) -> bool {
        self.move_item(self.selected_index, MoveDirection::Up)
    }

    /// 커서 항목 아래로 이동
    pub fn move_selected_down(&mut self) -> bool {
        self.move_item(self.selected_index, MoveDirection::Down)
    }

    /// 커서 항목 삭제
    pub fn delete_selected(&mut self) -> Option<PathBuf> {
        self.delete(self.selected_index)
    }

    pub fn cursor_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.selected_index + 1 < self.paths.len() {
            self.selected_index += 1;
        }
    }

    pub fn cursor_top(&mut self) {
        self.selected_index = 0;
    }

    pub fn cursor_bottom(&mut self) {
        self.selected_index = self.paths.len().saturating_sub(1);
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

    fn clamp_cursor(&mut self) {
        if self.selected_index >= self.paths.len() {
            self.selected_index = self.paths.len().saturating_sub(1);
        }
        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        }
    }

    /// 워커에 넘길 불변 스냅샷
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.paths.clone()
    }

    /// 표시용 파일 이름 목록
    pub fn display_names(&self) -> Vec<String> {
        self.paths.iter().map(|p| base_name(p)).collect()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
