//! 다이얼로그 시스템
//!
//! 도움말, 메시지/에러, 병합 모드 선택 위젯 정의

mod kind;

pub use kind::{DialogKind, DialogResult};

use crate::core::actions::generate_help_entries;
use crate::models::operation::MergeMode;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;
/// 다이얼로그 내부 상단 패딩 (border 아래 여백)
const DIALOG_V_PADDING: u16 = 1;

/// 도움말 전체 행 (is_header, key, description)
pub fn help_rows() -> Vec<(bool, &'static str, &'static str)> {
    let mut rows = Vec::new();
    for (category, items) in generate_help_entries() {
        rows.push((true, category, ""));
        for (key, desc) in items {
            rows.push((false, key, desc));
        }
        rows.push((false, "", ""));
    }
    rows
}

/// 다이얼로그 위젯
pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    border_color: Color,
    title_color: Color,
    error_color: Color,
    key_color: Color,
    button_bg: Color,
    button_fg: Color,
    button_selected_bg: Color,
    button_selected_fg: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::Rgb(212, 212, 212),
            border_color: Color::Rgb(33, 115, 70),
            title_color: Color::Rgb(51, 160, 111),
            error_color: Color::Rgb(244, 71, 71),
            key_color: Color::Rgb(86, 156, 214),
            button_bg: Color::Rgb(60, 60, 60),
            button_fg: Color::Rgb(212, 212, 212),
            button_selected_bg: Color::Rgb(33, 115, 70),
            button_selected_fg: Color::White,
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.fg_primary.to_color();
        self.border_color = theme.panel_active_border.to_color();
        self.title_color = theme.accent.to_color();
        self.error_color = theme.error.to_color();
        self.key_color = theme.directory.to_color();
        self.button_bg = theme.command_bar_bg.to_color();
        self.button_fg = theme.fg_primary.to_color();
        self.button_selected_bg = theme.file_selected_bg.to_color();
        self.button_selected_fg = theme.file_selected.to_color();
        self
    }

    /// 다이얼로그 영역 계산 (화면 중앙, 반응형)
    fn calculate_area(&self, screen: Rect) -> Rect {
        let sw = screen.width;
        let sh = screen.height;

        let (width, height) = match self.kind {
            DialogKind::Error { message, .. } | DialogKind::Message { message, .. } => {
                let lines = message.lines().count().max(1) + message.width() / 44;
                let w = 50u16.min(sw.saturating_sub(4)).max(30);
                let h = (6 + lines as u16).min(sh.saturating_sub(4)).max(6);
                (w, h)
            }
            DialogKind::Help { .. } => {
                let w = 60u16.min(sw.saturating_sub(4)).max(40);
                let h = sh.saturating_sub(6).max(15);
                (w, h)
            }
            DialogKind::ModeSelect { .. } => (36u16, 4 + MergeMode::CHOICES.len() as u16 + 2),
        };

        let width = width.min(sw.saturating_sub(4));
        let height = height.min(sh.saturating_sub(4));

        let x = screen.x + (sw.saturating_sub(width)) / 2;
        let y = screen.y + (sh.saturating_sub(height)) / 2;

        Rect {
            x,
            y,
            width,
            height,
        }
    }

    fn frame(&self, buf: &mut Buffer, area: Rect, title: &str, accent: Color) {
        Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(self.bg_color))
            .render(area, buf);
    }

    /// 버튼 렌더링 헬퍼
    fn render_button(&self, buf: &mut Buffer, x: u16, y: u16, label: &str, is_selected: bool) {
        let (bg, fg) = if is_selected {
            (self.button_selected_bg, self.button_selected_fg)
        } else {
            (self.button_bg, self.button_fg)
        };
        buf.set_string(x, y, format!(" {} ", label), Style::default().fg(fg).bg(bg));
    }

    /// 에러/메시지 다이얼로그 렌더링
    fn render_message(&self, buf: &mut Buffer, area: Rect, title: &str, message: &str, is_error: bool) {
        let accent = if is_error {
            self.error_color
        } else {
            self.border_color
        };
        self.frame(buf, area, title, accent);

        let inner = Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(DIALOG_V_PADDING + 3),
        };
        Paragraph::new(message)
            .style(Style::default().fg(self.fg_color))
            .wrap(Wrap { trim: true })
            .render(inner, buf);

        let button_y = area.y + area.height.saturating_sub(2);
        let button_x = area.x + area.width.saturating_sub(6) / 2;
        self.render_button(buf, button_x, button_y, "OK", true);
    }

    /// 모드 선택 다이얼로그 렌더링
    fn render_mode_select(&self, buf: &mut Buffer, area: Rect, selected_index: usize) {
        self.frame(buf, area, "Merge Mode", self.border_color);

        let x = area.x + DIALOG_H_PADDING;
        let width = area.width.saturating_sub(DIALOG_H_PADDING * 2) as usize;
        for (i, mode) in MergeMode::CHOICES.iter().enumerate() {
            let y = area.y + DIALOG_V_PADDING + 1 + i as u16;
            let label = if mode.is_set() {
                mode.label()
            } else {
                "(none)"
            };
            let text = format!(" {:<w$}", label, w = width.saturating_sub(1));
            let style = if i == selected_index {
                Style::default()
                    .fg(self.button_selected_fg)
                    .bg(self.button_selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.fg_color)
            };
            buf.set_string(x, y, text, style);
        }

        let hint = "Enter:Select  Esc:Cancel";
        let hint_x = area.x + area.width.saturating_sub(hint.width() as u16) / 2;
        buf.set_string(
            hint_x,
            area.y + area.height.saturating_sub(2),
            hint,
            Style::default().fg(Color::Rgb(128, 128, 128)),
        );
    }

    /// 도움말 다이얼로그 렌더링
    fn render_help(&self, buf: &mut Buffer, area: Rect, scroll_offset: usize) {
        self.frame(buf, area, "Keyboard Shortcuts", self.title_color);

        let inner = Rect {
            x: area.x + DIALOG_H_PADDING,
            y: area.y + DIALOG_V_PADDING,
            width: area.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: area.height.saturating_sub(3), // 하단 힌트 공간 확보
        };

        let header_style = Style::default()
            .fg(self.title_color)
            .add_modifier(Modifier::BOLD);
        let key_style = Style::default().fg(self.key_color);
        let desc_style = Style::default().fg(self.fg_color);

        let rows = help_rows();
        let visible_height = inner.height as usize;
        let max_scroll = rows.len().saturating_sub(visible_height);
        let effective_scroll = scroll_offset.min(max_scroll);
        let key_col_width = 16u16;

        for (i, (is_header, key, desc)) in rows
            .iter()
            .skip(effective_scroll)
            .take(visible_height)
            .enumerate()
        {
            let y = inner.y + i as u16;
            if *is_header {
                buf.set_string(inner.x, y, key, header_style);
            } else if !key.is_empty() {
                buf.set_string(inner.x + 2, y, key, key_style);
                buf.set_string(inner.x + key_col_width, y, desc, desc_style);
            }
        }

        if rows.len() > visible_height && visible_height > 0 {
            super::panel::render_scrollbar(
                buf,
                area.x + area.width - 2,
                inner.y,
                visible_height,
                rows.len(),
                effective_scroll,
            );
        }

        let hint = "Esc/?:Close  j/k:Scroll";
        let hint_x = area.x + area.width.saturating_sub(hint.width() as u16) / 2;
        buf.set_string(
            hint_x,
            area.y + area.height.saturating_sub(2),
            hint,
            Style::default().fg(Color::Rgb(128, 128, 128)),
        );
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dialog_area = self.calculate_area(area);
        if dialog_area.width < 4 || dialog_area.height < 4 {
            return;
        }

        Clear.render(dialog_area, buf);

        match self.kind {
            DialogKind::Error { title, message } => {
                self.render_message(buf, dialog_area, title, message, true);
            }
            DialogKind::Message { title, message } => {
                self.render_message(buf, dialog_area, title, message, false);
            }
            DialogKind::Help { scroll_offset } => {
                self.render_help(buf, dialog_area, *scroll_offset);
            }
            DialogKind::ModeSelect { selected_index } => {
                self.render_mode_select(buf, dialog_area, *selected_index);
            }
        }
    }
}
