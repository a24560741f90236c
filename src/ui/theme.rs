use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 기본 테마 이름
pub const DEFAULT_THEME: &str = "dark";

/// 색상 테마
///
/// 미리 정의된 테마 또는 `<config>/sheetmerge/themes/*.toml` 파일에서 읽은 테마.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    // 배경/전경
    pub bg_primary: ColorDef,
    pub fg_primary: ColorDef,

    // 패널
    pub panel_active_border: ColorDef,
    pub panel_inactive_border: ColorDef,

    // 목록
    pub file_normal: ColorDef,
    pub file_selected: ColorDef,
    pub file_selected_bg: ColorDef,
    pub file_marked: ColorDef,
    pub directory: ColorDef,
    pub spreadsheet: ColorDef,
    pub queue_index: ColorDef,

    // UI 컴포넌트
    pub title_bar_bg: ColorDef,
    pub title_bar_fg: ColorDef,
    pub progress_filled: ColorDef,
    pub progress_bg: ColorDef,
    pub status_bar_bg: ColorDef,
    pub status_bar_fg: ColorDef,
    pub command_bar_bg: ColorDef,
    pub command_bar_fg: ColorDef,

    // 강조
    pub accent: ColorDef,
    pub warning: ColorDef,
    pub error: ColorDef,
    pub success: ColorDef,
}

/// 색상 정의 (TOML 직렬화/역직렬화 지원)
///
/// Hex 문자열("#1e1e1e") 또는 색상 이름("Red")을 지원합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Hex(String),
    Named(String),
}

impl ColorDef {
    pub fn to_color(&self) -> Color {
        match self {
            ColorDef::Hex(value) | ColorDef::Named(value) if value.starts_with('#') => {
                parse_hex_color(value)
            }
            ColorDef::Hex(value) | ColorDef::Named(value) => parse_named_color(value),
        }
    }
}

impl From<&str> for ColorDef {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            ColorDef::Hex(s.to_string())
        } else {
            ColorDef::Named(s.to_string())
        }
    }
}

fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Reset;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
    Color::Rgb(channel(0..2), channel(2..4), channel(4..6))
}

fn parse_named_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

impl Theme {
    /// Dark 테마 (기본)
    pub fn dark() -> Self {
        Theme {
            bg_primary: "#1e1e1e".into(),
            fg_primary: "#d4d4d4".into(),

            panel_active_border: "#217346".into(),
            panel_inactive_border: "#3c3c3c".into(),

            file_normal: "#d4d4d4".into(),
            file_selected: "#ffffff".into(),
            file_selected_bg: "#217346".into(),
            file_marked: "#e5c07b".into(),
            directory: "#569cd6".into(),
            spreadsheet: "#6cc644".into(),
            queue_index: "#808080".into(),

            title_bar_bg: "#2d2d30".into(),
            title_bar_fg: "#ffffff".into(),
            progress_filled: "#217346".into(),
            progress_bg: "#3c3c3c".into(),
            status_bar_bg: "#252526".into(),
            status_bar_fg: "#d4d4d4".into(),
            command_bar_bg: "#2d2d30".into(),
            command_bar_fg: "#cccccc".into(),

            accent: "#33a06f".into(),
            warning: "#ffa500".into(),
            error: "#f44747".into(),
            success: "#4ec9b0".into(),
        }
    }

    /// Light 테마
    pub fn light() -> Self {
        Theme {
            bg_primary: "#ffffff".into(),
            fg_primary: "#1e1e1e".into(),

            panel_active_border: "#217346".into(),
            panel_inactive_border: "#cccccc".into(),

            file_normal: "#1e1e1e".into(),
            file_selected: "#000000".into(),
            file_selected_bg: "#c6efce".into(),
            file_marked: "#9c5700".into(),
            directory: "#0066cc".into(),
            spreadsheet: "#107c10".into(),
            queue_index: "#6e6e6e".into(),

            title_bar_bg: "#217346".into(),
            title_bar_fg: "#ffffff".into(),
            progress_filled: "#217346".into(),
            progress_bg: "#e1e1e1".into(),
            status_bar_bg: "#f3f3f3".into(),
            status_bar_fg: "#1e1e1e".into(),
            command_bar_bg: "#f3f3f3".into(),
            command_bar_fg: "#1e1e1e".into(),

            accent: "#217346".into(),
            warning: "#ff8c00".into(),
            error: "#e51400".into(),
            success: "#107c10".into(),
        }
    }

    /// High Contrast 테마
    pub fn high_contrast() -> Self {
        Theme {
            bg_primary: "#000000".into(),
            fg_primary: "#ffffff".into(),

            panel_active_border: "#00ff00".into(),
            panel_inactive_border: "#808080".into(),

            file_normal: "#ffffff".into(),
            file_selected: "#000000".into(),
            file_selected_bg: "#00ff00".into(),
            file_marked: "#ffff00".into(),
            directory: "#00ffff".into(),
            spreadsheet: "#00ff00".into(),
            queue_index: "#c0c0c0".into(),

            title_bar_bg: "#000000".into(),
            title_bar_fg: "#00ff00".into(),
            progress_filled: "#00ff00".into(),
            progress_bg: "#404040".into(),
            status_bar_bg: "#000000".into(),
            status_bar_fg: "#00ff00".into(),
            command_bar_bg: "#000000".into(),
            command_bar_fg: "#ffffff".into(),

            accent: "#00ff00".into(),
            warning: "#ffff00".into(),
            error: "#ff0000".into(),
            success: "#00ff00".into(),
        }
    }

    /// TOML 파일에서 테마 로드
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let theme: Theme = toml::from_str(&content)?;
        Ok(theme)
    }
}

/// 테마 관리자
///
/// 현재 활성 테마를 관리하고 런타임에 테마를 전환합니다.
pub struct ThemeManager {
    current_name: String,
    current_theme: Theme,
    available_themes: Vec<(String, Theme)>,
}

impl ThemeManager {
    /// 기본 테마 관리자 생성 (Dark 테마)
    pub fn new() -> Self {
        Self {
            current_name: DEFAULT_THEME.to_string(),
            current_theme: Theme::dark(),
            available_themes: vec![
                ("dark".to_string(), Theme::dark()),
                ("light".to_string(), Theme::light()),
                ("high_contrast".to_string(), Theme::high_contrast()),
            ],
        }
    }

    pub fn current(&self) -> &Theme {
        &self.current_theme
    }

    pub fn current_name(&self) -> &str {
        &self.current_name
    }

    /// 테마 전환 (이름으로)
    pub fn switch_theme(&mut self, name: &str) -> Result<(), String> {
        let Some((found, theme)) = self.available_themes.iter().find(|(n, _)| n == name) else {
            return Err(format!(
                "Theme not found: {} (available: {})",
                name,
                self.available_themes().join(", ")
            ));
        };
        self.current_name = found.clone();
        self.current_theme = theme.clone();
        Ok(())
    }

    /// 사용 가능한 테마 목록
    pub fn available_themes(&self) -> Vec<String> {
        self.available_themes
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// 커스텀 테마 추가 (같은 이름이 있으면 교체)
    pub fn add_theme(&mut self, name: String, theme: Theme) {
        if let Some(slot) = self.available_themes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = theme;
        } else {
            self.available_themes.push((name, theme));
        }
    }

    /// 디렉토리의 `*.toml` 테마 파일 로드. 읽을 수 없는 파일은 건너뛴다.
    pub fn load_themes_from_dir(&mut self, themes_dir: &Path) -> anyhow::Result<usize> {
        if !themes_dir.is_dir() {
            return Ok(0);
        }

        let mut loaded = 0;
        for entry in fs::read_dir(themes_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }
            match Theme::from_file(&path) {
                Ok(theme) => {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("custom")
                        .to_string();
                    self.add_theme(name, theme);
                    loaded += 1;
                }
                Err(err) => log::warn!("skipping theme {}: {}", path.display(), err),
            }
        }
        Ok(loaded)
    }

    /// 설정 디렉토리에서 테마 파일 로드
    pub fn load_themes_from_config_dir(&mut self) -> anyhow::Result<usize> {
        match Self::themes_dir() {
            Some(dir) => self.load_themes_from_dir(&dir),
            None => Ok(0),
        }
    }

    fn themes_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sheetmerge").join("themes"))
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}
