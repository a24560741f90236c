// Queue panel component - 병합 대기열 패널
//
// 선택 순서대로 입력 파일 이름을 번호와 함께 표시

use crate::ui::components::panel::{render_frame, render_scrollbar, PanelColors, PanelStatus};
use crate::ui::Theme;
use crate::utils::path_display::truncate_middle;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// 대기열 패널 컴포넌트
pub struct QueuePanel<'a> {
    /// 표시 이름 (기본 파일 이름)
    names: &'a [String],
    status: PanelStatus,
    selected_index: usize,
    scroll_offset: usize,
    /// 병합 중에는 커서를 숨긴다
    locked: bool,
    colors: PanelColors,
}

impl Default for QueuePanel<'_> {
    fn default() -> Self {
        Self {
            names: &[],
            status: PanelStatus::default(),
            selected_index: 0,
            scroll_offset: 0,
            locked: false,
            colors: PanelColors::default(),
        }
    }
}

impl<'a> QueuePanel<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(mut self, names: &'a [String]) -> Self {
        self.names = names;
        self
    }

    pub fn status(mut self, status: PanelStatus) -> Self {
        self.status = status;
        self
    }

    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn theme(mut self, theme: &Theme) -> Self {
        self.colors = PanelColors::from_theme(theme);
        self
    }
}

impl Widget for QueuePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = format!("Merge Queue ({})", self.names.len());
        let inner = render_frame(area, buf, &title, self.status, &self.colors);
        let height = inner.height as usize;
        if height == 0 {
            return;
        }

        if self.names.is_empty() {
            buf.set_string(
                inner.x,
                inner.y,
                " (No files selected)",
                Style::default().fg(self.colors.dim),
            );
            return;
        }

        let has_scrollbar = self.names.len() > height;
        let width = (inner.width as usize).saturating_sub(usize::from(has_scrollbar));
        let number_width = self.names.len().to_string().len();

        let start = self.scroll_offset.min(self.names.len() - 1);
        let end = (start + height).min(self.names.len());
        for (line, index) in (start..end).enumerate() {
            let is_cursor = index == self.selected_index && !self.locked;
            let (number_style, name_style) = if is_cursor {
                let style = self.colors.cursor_style(self.status);
                (style, style)
            } else {
                (
                    Style::default().fg(self.colors.dim),
                    Style::default().fg(self.colors.spreadsheet),
                )
            };

            let number = format!(" {:>w$}. ", index + 1, w = number_width);
            let name_width = width.saturating_sub(number.width());
            let name = truncate_middle(&self.names[index], name_width);
            let padding = " ".repeat(name_width.saturating_sub(name.width()));

            let row = Line::from(vec![
                Span::styled(number, number_style),
                Span::styled(name, name_style),
                Span::styled(padding, name_style),
            ]);
            buf.set_line(inner.x, inner.y + line as u16, &row, width as u16);
        }

        if has_scrollbar {
            render_scrollbar(
                buf,
                inner.x + inner.width - 1,
                inner.y,
                height,
                self.names.len(),
                start,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_render_numbers_items_in_order() {
        let names = vec!["b.xlsx".to_string(), "a.xlsx".to_string()];
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        QueuePanel::new()
            .names(&names)
            .status(PanelStatus::Active)
            .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Merge Queue (2)"));
        assert!(row_text(&buf, 1).contains("1. b.xlsx"));
        assert!(row_text(&buf, 2).contains("2. a.xlsx"));
    }

    #[test]
    fn test_render_empty_queue() {
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        QueuePanel::new().render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("No files selected"));
    }
}
