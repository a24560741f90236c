// Layout system - 반응형 레이아웃 시스템
//
// 터미널 크기에 따른 레이아웃 모드:
// - 80+ cols: 파일 선택 + 대기열 나란히 표시
// - 40-79 cols: 포커스 패널만 표시 (Tab으로 전환)
// - <40 cols 또는 높이 부족: 경고 메시지 표시

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 최소 터미널 크기 상수
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;
pub const DUAL_PANEL_MIN_WIDTH: u16 = 80;

/// 파일 선택 패널 너비 비율 (%)
const PICKER_PERCENT: u16 = 55;

/// 레이아웃 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// 두 패널 모두 표시
    DualPanel,
    /// 포커스 패널만 표시
    SinglePanel,
    /// 경고 모드 (터미널이 너무 작음)
    TooSmall,
}

/// 포커스 패널
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    /// 파일 선택 (좌측)
    #[default]
    Picker,
    /// 병합 대기열 (우측)
    Queue,
}

impl ActivePanel {
    /// 패널 전환
    pub fn toggle(&mut self) {
        *self = match self {
            ActivePanel::Picker => ActivePanel::Queue,
            ActivePanel::Queue => ActivePanel::Picker,
        };
    }
}

/// 레이아웃 영역
#[derive(Debug, Clone, Default)]
pub struct LayoutAreas {
    /// 상단 제목줄
    pub title_bar: Rect,
    /// 파일 선택 패널
    pub picker_panel: Rect,
    /// 대기열 패널
    pub queue_panel: Rect,
    /// 모드 + 진행률 줄
    pub progress_bar: Rect,
    /// 상태 메시지 줄
    pub status_bar: Rect,
    /// 하단 커맨드 바
    pub command_bar: Rect,
    /// 경고 메시지 영역 (TooSmall 모드에서 사용)
    pub warning: Rect,
}

/// 레이아웃 상태
#[derive(Debug, Clone)]
pub struct LayoutState {
    pub mode: LayoutMode,
    pub active_panel: ActivePanel,
    pub terminal_size: (u16, u16),
    pub areas: LayoutAreas,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            mode: LayoutMode::DualPanel,
            active_panel: ActivePanel::default(),
            terminal_size: (80, 24),
            areas: LayoutAreas::default(),
        }
    }
}

/// 레이아웃 매니저
#[derive(Debug, Default)]
pub struct LayoutManager {
    state: LayoutState,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 터미널 크기에 따라 레이아웃 모드 결정
    fn determine_mode(width: u16, height: u16) -> LayoutMode {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            LayoutMode::TooSmall
        } else if width < DUAL_PANEL_MIN_WIDTH {
            LayoutMode::SinglePanel
        } else {
            LayoutMode::DualPanel
        }
    }

    /// 터미널 크기 업데이트 및 레이아웃 재계산
    pub fn update(&mut self, area: Rect) {
        self.state.terminal_size = (area.width, area.height);
        self.state.mode = Self::determine_mode(area.width, area.height);
        self.state.areas = self.calculate_areas(area);
    }

    fn calculate_areas(&self, area: Rect) -> LayoutAreas {
        if self.state.mode == LayoutMode::TooSmall {
            return LayoutAreas {
                warning: area,
                ..Default::default()
            };
        }

        // 제목줄 | 패널 | 진행률 | 상태 | 커맨드바
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let body = vertical_chunks[1];
        let (picker_panel, queue_panel) = match self.state.mode {
            LayoutMode::DualPanel => {
                let panel_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(PICKER_PERCENT),
                        Constraint::Percentage(100 - PICKER_PERCENT),
                    ])
                    .split(body);
                (panel_chunks[0], panel_chunks[1])
            }
            _ => match self.state.active_panel {
                ActivePanel::Picker => (body, Rect::default()),
                ActivePanel::Queue => (Rect::default(), body),
            },
        };

        LayoutAreas {
            title_bar: vertical_chunks[0],
            picker_panel,
            queue_panel,
            progress_bar: vertical_chunks[2],
            status_bar: vertical_chunks[3],
            command_bar: vertical_chunks[4],
            warning: Rect::default(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.state.mode
    }

    pub fn areas(&self) -> &LayoutAreas {
        &self.state.areas
    }

    pub fn active_panel(&self) -> ActivePanel {
        self.state.active_panel
    }

    /// 패널 전환 (싱글 패널 모드에서는 영역도 다시 계산)
    pub fn toggle_panel(&mut self) {
        self.state.active_panel.toggle();
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.state.terminal_size
    }

    /// 패널 내부 목록 높이 (위/아래 테두리 제외)
    pub fn panel_list_height(&self, panel: ActivePanel) -> usize {
        let area = match panel {
            ActivePanel::Picker => self.state.areas.picker_panel,
            ActivePanel::Queue => self.state.areas.queue_panel,
        };
        area.height.saturating_sub(2) as usize
    }
}
