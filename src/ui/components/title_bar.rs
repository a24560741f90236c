// Title bar component - 상단 제목줄
//
// 앱 이름, 출력 위치, 테마 이름 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// 제목줄 컴포넌트
pub struct TitleBar<'a> {
    app_name: &'a str,
    /// 출력 디렉토리 표시 문자열
    output_dir: &'a str,
    /// 오른쪽 끝 표시 (테마 이름)
    right_label: &'a str,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
}

impl Default for TitleBar<'_> {
    fn default() -> Self {
        Self {
            app_name: "SheetMerge",
            output_dir: "",
            right_label: "",
            bg_color: Color::Rgb(45, 45, 48),
            fg_color: Color::White,
            accent_color: Color::Rgb(51, 160, 111),
        }
    }
}

impl<'a> TitleBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_dir(mut self, dir: &'a str) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn right_label(mut self, label: &'a str) -> Self {
        self.right_label = label;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.title_bar_bg.to_color();
        self.fg_color = theme.title_bar_fg.to_color();
        self.accent_color = theme.accent.to_color();
        self
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.bg_color));

        let name = format!(" {} ", self.app_name);
        let output = if self.output_dir.is_empty() {
            String::new()
        } else {
            format!(" Output: {}", self.output_dir)
        };
        let right = format!("[{}] ", self.right_label);

        let used = name.width() + output.width() + right.width();
        let padding = " ".repeat((area.width as usize).saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(
                name,
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(output, Style::default().fg(self.fg_color)),
            Span::raw(padding),
            Span::styled(right, Style::default().fg(self.fg_color)),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shows_output_dir() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        TitleBar::new()
            .output_dir("~/Downloads")
            .right_label("dark")
            .render(area, &mut buf);

        let text: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(text.starts_with(" SheetMerge "));
        assert!(text.contains("Output: ~/Downloads"));
        assert!(text.trim_end().ends_with("[dark]"));
    }
}
