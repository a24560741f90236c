// Status bar component - 진행률 줄 + 상태 메시지 줄
//
// 병합 모드, 0-100 진행률 게이지, 마지막 결과 메시지 표시

use crate::models::operation::MergeMode;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 상태 메시지 종류 (색상 결정)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Error,
}

/// 모드 + 진행률 줄
pub struct ProgressBar<'a> {
    mode: MergeMode,
    percent: u8,
    /// 병합 중일 때 마지막으로 읽은 파일
    current_file: Option<&'a str>,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
    filled_color: Color,
    track_color: Color,
}

impl Default for ProgressBar<'_> {
    fn default() -> Self {
        Self {
            mode: MergeMode::Unset,
            percent: 0,
            current_file: None,
            bg_color: Color::Rgb(37, 37, 38),
            fg_color: Color::Rgb(212, 212, 212),
            accent_color: Color::Rgb(51, 160, 111),
            filled_color: Color::Rgb(33, 115, 70),
            track_color: Color::Rgb(60, 60, 60),
        }
    }
}

impl<'a> ProgressBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn percent(mut self, percent: u8) -> Self {
        self.percent = percent.min(100);
        self
    }

    pub fn current_file(mut self, file: Option<&'a str>) -> Self {
        self.current_file = file;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.accent_color = theme.accent.to_color();
        self.filled_color = theme.progress_filled.to_color();
        self.track_color = theme.progress_bg.to_color();
        self
    }

    fn mode_text(&self) -> String {
        let label = if self.mode.is_set() {
            self.mode.label()
        } else {
            "-"
        };
        format!(" Mode: {:<9} ", label)
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let mode_text = self.mode_text();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(mode_text.width() as u16),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let mode_style = if self.mode.is_set() {
            Style::default()
                .fg(self.accent_color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.fg_color)
        };
        Paragraph::new(Line::from(Span::styled(mode_text, mode_style))).render(chunks[0], buf);

        let label = match self.current_file {
            Some(file) => format!("{}% {}", self.percent, file),
            None => format!("{}%", self.percent),
        };
        Gauge::default()
            .gauge_style(Style::default().fg(self.filled_color).bg(self.track_color))
            .percent(u16::from(self.percent))
            .label(Span::styled(label, Style::default().fg(self.fg_color)))
            .render(chunks[1], buf);
    }
}

/// 상태 메시지 줄
pub struct StatusBar<'a> {
    message: &'a str,
    kind: StatusKind,
    /// 오른쪽 요약 (대기열 파일 수)
    summary: &'a str,
    bg_color: Color,
    fg_color: Color,
    success_color: Color,
    error_color: Color,
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self {
            message: "",
            kind: StatusKind::Info,
            summary: "",
            bg_color: Color::Rgb(37, 37, 38),
            fg_color: Color::Rgb(212, 212, 212),
            success_color: Color::Rgb(78, 201, 176),
            error_color: Color::Rgb(244, 71, 71),
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: &'a str, kind: StatusKind) -> Self {
        self.message = message;
        self.kind = kind;
        self
    }

    pub fn summary(mut self, summary: &'a str) -> Self {
        self.summary = summary;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.success_color = theme.success.to_color();
        self.error_color = theme.error.to_color();
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let message_color = match self.kind {
            StatusKind::Info => self.fg_color,
            StatusKind::Success => self.success_color,
            StatusKind::Error => self.error_color,
        };

        let right = format!("{} ", self.summary);
        let left_width = (area.width as usize).saturating_sub(right.width() + 1);
        let message = crate::utils::path_display::truncate_middle(self.message, left_width);
        let padding = " ".repeat(left_width.saturating_sub(message.width()));

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(message, Style::default().fg(message_color)),
            Span::raw(padding),
            Span::styled(right, Style::default().fg(Color::Rgb(128, 128, 128))),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
