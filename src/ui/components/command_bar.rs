// Command bar component - 하단 커맨드 바 컴포넌트
//
// 액션 레지스트리의 주요 단축키 표시

use crate::core::actions::generate_command_bar_items;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 커맨드 항목
#[derive(Debug, Clone)]
pub struct CommandItem {
    /// 단축키 (a, F5, ...)
    pub key: String,
    /// 레이블 (Add, Merge, ...)
    pub label: String,
    /// 활성화 여부
    pub enabled: bool,
}

impl CommandItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            enabled: true,
        }
    }
}

/// 커맨드 바 컴포넌트
pub struct CommandBar {
    /// 커맨드 항목들
    commands: Vec<CommandItem>,
    /// 배경색
    bg_color: Color,
    /// 전경색 (키)
    key_fg_color: Color,
    /// 전경색 (레이블)
    label_fg_color: Color,
    /// 비활성 색상
    disabled_color: Color,
}

impl Default for CommandBar {
    fn default() -> Self {
        Self {
            commands: generate_command_bar_items(),
            bg_color: Color::Rgb(45, 45, 48),
            key_fg_color: Color::Rgb(51, 160, 111),
            label_fg_color: Color::Rgb(212, 212, 212),
            disabled_color: Color::Rgb(100, 100, 100),
        }
    }
}

impl CommandBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 병합 중 비활성화할 키 목록 적용
    pub fn disable_keys(mut self, keys: &[&str]) -> Self {
        for cmd in &mut self.commands {
            if keys.contains(&cmd.key.as_str()) {
                cmd.enabled = false;
            }
        }
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.command_bar_bg.to_color();
        self.key_fg_color = theme.accent.to_color();
        self.label_fg_color = theme.command_bar_fg.to_color();
        self.disabled_color = theme.panel_inactive_border.to_color();
        self
    }
}

impl CommandBar {
    fn item_styles(&self, enabled: bool) -> (Style, Style) {
        if enabled {
            (
                Style::default()
                    .fg(self.key_fg_color)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(self.label_fg_color),
            )
        } else {
            let dim = Style::default().fg(self.disabled_color);
            (dim, dim)
        }
    }
}

impl Widget for CommandBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        // 너비를 넘는 항목은 통째로 생략 (registry priority 순)
        let max_width = area.width as usize;
        let mut used = 1;
        let mut spans = vec![Span::raw(" ")];
        for cmd in &self.commands {
            let item_width = cmd.key.width() + 1 + cmd.label.width();
            let gap = usize::from(spans.len() > 1);
            if used + gap + item_width > max_width {
                break;
            }
            if gap == 1 {
                spans.push(Span::raw(" "));
            }
            let (key_style, label_style) = self.item_styles(cmd.enabled);
            spans.push(Span::styled(cmd.key.clone(), key_style));
            spans.push(Span::styled(format!(":{}", cmd.label), label_style));
            used += gap + item_width;
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
