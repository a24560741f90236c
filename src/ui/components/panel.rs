// Panel component - 파일 선택 패널 컴포넌트
//
// 디렉토리 목록 표시, 커서/표시 상태, 테두리 렌더링

use crate::models::file_entry::FileEntry;
use crate::ui::Theme;
use crate::utils::formatter::{format_date, format_file_size};
use crate::utils::path_display::{truncate_middle, truncate_path};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::collections::HashSet;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// 패널 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Inactive,
    Active,
}

/// 빈 HashSet을 위한 정적 참조
static EMPTY_SELECTION: std::sync::LazyLock<HashSet<usize>> =
    std::sync::LazyLock::new(HashSet::new);

/// 공통 패널 색상
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelColors {
    pub active_border: Color,
    pub inactive_border: Color,
    pub bg: Color,
    pub normal: Color,
    pub selected: Color,
    pub selected_bg: Color,
    pub marked: Color,
    pub directory: Color,
    pub spreadsheet: Color,
    pub dim: Color,
}

impl Default for PanelColors {
    fn default() -> Self {
        Self {
            active_border: Color::Rgb(33, 115, 70),
            inactive_border: Color::Rgb(60, 60, 60),
            bg: Color::Rgb(30, 30, 30),
            normal: Color::Rgb(212, 212, 212),
            selected: Color::Rgb(255, 255, 255),
            selected_bg: Color::Rgb(33, 115, 70),
            marked: Color::Rgb(229, 192, 123),
            directory: Color::Rgb(86, 156, 214),
            spreadsheet: Color::Rgb(108, 198, 68),
            dim: Color::Rgb(128, 128, 128),
        }
    }
}

impl PanelColors {
    pub(crate) fn from_theme(theme: &Theme) -> Self {
        Self {
            active_border: theme.panel_active_border.to_color(),
            inactive_border: theme.panel_inactive_border.to_color(),
            bg: theme.bg_primary.to_color(),
            normal: theme.file_normal.to_color(),
            selected: theme.file_selected.to_color(),
            selected_bg: theme.file_selected_bg.to_color(),
            marked: theme.file_marked.to_color(),
            directory: theme.directory.to_color(),
            spreadsheet: theme.spreadsheet.to_color(),
            dim: theme.queue_index.to_color(),
        }
    }

    pub(crate) fn border(&self, status: PanelStatus) -> Color {
        match status {
            PanelStatus::Active => self.active_border,
            PanelStatus::Inactive => self.inactive_border,
        }
    }

    /// 커서 줄 스타일 (비활성 패널에서는 밑줄만)
    pub(crate) fn cursor_style(&self, status: PanelStatus) -> Style {
        match status {
            PanelStatus::Active => Style::default().fg(self.selected).bg(self.selected_bg),
            PanelStatus::Inactive => Style::default()
                .fg(self.normal)
                .add_modifier(Modifier::UNDERLINED),
        }
    }
}

/// 테두리 + 제목 블록을 그리고 내부 영역 반환
pub(crate) fn render_frame(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    status: PanelStatus,
    colors: &PanelColors,
) -> Rect {
    let title_style = match status {
        PanelStatus::Active => Style::default()
            .fg(colors.normal)
            .add_modifier(Modifier::BOLD),
        PanelStatus::Inactive => Style::default().fg(colors.normal),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border(status)))
        .title(Span::styled(format!(" {} ", title), title_style))
        .style(Style::default().bg(colors.bg));

    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

/// 세로 스크롤바 렌더링
pub(crate) fn render_scrollbar(
    buf: &mut Buffer,
    x: u16,
    top: u16,
    track_height: usize,
    total_items: usize,
    scroll_offset: usize,
) {
    if track_height == 0 || total_items <= track_height {
        return;
    }
    let thumb_height = (track_height * track_height / total_items).max(1);
    let max_scroll = total_items.saturating_sub(track_height);
    let thumb_pos = if max_scroll == 0 {
        0
    } else {
        scroll_offset.min(max_scroll) * track_height.saturating_sub(thumb_height) / max_scroll
    };

    let track_style = Style::default().fg(Color::Rgb(60, 60, 60));
    let thumb_style = Style::default().fg(Color::Rgb(150, 150, 150));
    for i in 0..track_height {
        let (symbol, style) = if i >= thumb_pos && i < thumb_pos + thumb_height {
            ("┃", thumb_style)
        } else {
            ("│", track_style)
        };
        buf.set_string(x, top + i as u16, symbol, style);
    }
}

/// 파일 선택 패널 컴포넌트
pub struct Panel<'a> {
    /// 현재 디렉토리
    path: &'a Path,
    status: PanelStatus,
    entries: &'a [FileEntry],
    /// 커서 위치 (".." 포함)
    selected_index: usize,
    scroll_offset: usize,
    /// ".." (상위 디렉토리) 표시 여부
    show_parent: bool,
    /// 표시된 항목 (entries 인덱스 기반)
    marked: &'a HashSet<usize>,
    /// 스프레드시트 필터 활성 여부 (제목 표시용)
    excel_only: bool,
    colors: PanelColors,
}

impl Default for Panel<'_> {
    fn default() -> Self {
        Self {
            path: Path::new(""),
            status: PanelStatus::default(),
            entries: &[],
            selected_index: 0,
            scroll_offset: 0,
            show_parent: false,
            marked: &EMPTY_SELECTION,
            excel_only: false,
            colors: PanelColors::default(),
        }
    }
}

impl<'a> Panel<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: &'a Path) -> Self {
        self.path = path;
        self
    }

    pub fn status(mut self, status: PanelStatus) -> Self {
        self.status = status;
        self
    }

    pub fn entries(mut self, entries: &'a [FileEntry]) -> Self {
        self.entries = entries;
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

    pub fn show_parent(mut self, show: bool) -> Self {
        self.show_parent = show;
        self
    }

    pub fn marked(mut self, marked: &'a HashSet<usize>) -> Self {
        self.marked = marked;
        self
    }

    pub fn excel_only(mut self, excel_only: bool) -> Self {
        self.excel_only = excel_only;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.colors = PanelColors::from_theme(theme);
        self
    }

    fn title(&self, max_width: usize) -> String {
        let suffix = if self.excel_only { " [Excel]" } else { "" };
        let path_width = max_width.saturating_sub(suffix.len());
        format!("{}{}", truncate_path(self.path, path_width), suffix)
    }

    fn entry_color(&self, entry: &FileEntry) -> Color {
        if entry.is_directory() {
            self.colors.directory
        } else if entry.is_spreadsheet() {
            self.colors.spreadsheet
        } else {
            self.colors.normal
        }
    }

    fn render_parent_row(&self, inner: Rect, buf: &mut Buffer, y: u16) {
        let style = if self.selected_index == 0 {
            self.colors.cursor_style(self.status)
        } else {
            Style::default().fg(self.colors.dim)
        };
        let text = format!(" {:<width$}", "[..]", width = (inner.width as usize).saturating_sub(1));
        buf.set_string(inner.x, y, text, style);
    }

    fn render_entry(&self, entry: &FileEntry, entry_index: usize, width: usize, buf: &mut Buffer, x: u16, y: u16) {
        let row = entry_index + usize::from(self.show_parent);
        let is_cursor = row == self.selected_index;
        let is_marked = self.marked.contains(&entry_index);

        let fg = if is_marked {
            self.colors.marked
        } else {
            self.entry_color(entry)
        };
        let style = if is_cursor {
            self.colors.cursor_style(self.status).fg(fg)
        } else {
            Style::default().fg(fg)
        };

        let marker = if is_marked { "*" } else { " " };
        let show_details = width >= 40;
        let detail = if show_details {
            let size = if entry.is_directory() {
                "<DIR>".to_string()
            } else {
                format_file_size(entry.size)
            };
            format!(" {:>9} {}", size, format_date(entry.modified))
        } else {
            String::new()
        };

        let name = if entry.is_directory() {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let name_width = width.saturating_sub(1 + detail.width());
        let name = truncate_middle(&name, name_width);
        let padding = " ".repeat(name_width.saturating_sub(name.width()));

        let line = Line::from(vec![
            Span::styled(marker, style.add_modifier(Modifier::BOLD)),
            Span::styled(name, style),
            Span::styled(padding, style),
            Span::styled(detail, style),
        ]);
        buf.set_line(x, y, &line, width as u16);
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = self.title((area.width as usize).saturating_sub(4));
        let inner = render_frame(area, buf, &title, self.status, &self.colors);
        if inner.height == 0 {
            return;
        }

        // scroll_offset 은 ".." 를 포함한 화면 인덱스 기준
        let parent_rows = usize::from(self.show_parent);
        let total_rows = self.entries.len() + parent_rows;
        let height = inner.height as usize;
        let has_scrollbar = total_rows > height;
        let width = (inner.width as usize).saturating_sub(usize::from(has_scrollbar));

        let start = self.scroll_offset.min(total_rows.saturating_sub(1));
        let end = (start + height).min(total_rows);
        for (line, row) in (start..end).enumerate() {
            let y = inner.y + line as u16;
            if row < parent_rows {
                self.render_parent_row(inner, buf, y);
            } else {
                let entry_index = row - parent_rows;
                self.render_entry(&self.entries[entry_index], entry_index, width, buf, inner.x, y);
            }
        }

        let used = end.saturating_sub(start);
        if self.entries.is_empty() && used < height {
            let message = if self.excel_only {
                " (No spreadsheet files)"
            } else {
                " (No files)"
            };
            buf.set_string(
                inner.x,
                inner.y + used as u16,
                message,
                Style::default().fg(self.colors.dim),
            );
        }

        if has_scrollbar {
            render_scrollbar(
                buf,
                inner.x + inner.width - 1,
                inner.y,
                height,
                total_rows,
                start,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file_entry::FileType;
    use std::path::PathBuf;
    use std::time::SystemTime;

    fn entry(name: &str, file_type: FileType) -> FileEntry {
        FileEntry::new(
            name.to_string(),
            PathBuf::from("/data").join(name),
            file_type,
            2048,
            SystemTime::UNIX_EPOCH,
            false,
        )
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_render_lists_parent_and_entries() {
        let entries = vec![entry("reports", FileType::Directory), entry("q1.xlsx", FileType::File)];
        let marked: HashSet<usize> = [1].into_iter().collect();
        let area = Rect::new(0, 0, 50, 6);
        let mut buf = Buffer::empty(area);

        Panel::new()
            .path(Path::new("/data"))
            .status(PanelStatus::Active)
            .entries(&entries)
            .show_parent(true)
            .marked(&marked)
            .render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("[..]"));
        assert!(row_text(&buf, 2).contains("reports/"));
        assert!(row_text(&buf, 2).contains("<DIR>"));
        let file_row = row_text(&buf, 3);
        assert!(file_row.contains("*q1.xlsx"));
        assert!(file_row.contains("2.0 KB"));
    }

    #[test]
    fn test_render_empty_with_filter_message() {
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        Panel::new()
            .path(Path::new("/data"))
            .excel_only(true)
            .render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("[Excel]"));
        assert!(row_text(&buf, 1).contains("No spreadsheet files"));
    }
}
