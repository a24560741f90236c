// Path display helpers - 경로/파일명 표시용 축약
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// 큐/상태줄에 표시할 파일 이름 (경로의 마지막 구성요소)
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// 문자열을 최대 너비에 맞춰 중간 생략한다.
pub fn truncate_middle(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= ELLIPSIS.len() + 1 {
        return take_prefix(text, max_width);
    }

    // 앞뒤를 같은 너비로 자른다 (홀수 너비면 한 칸 남는다)
    let side = (max_width - ELLIPSIS.len()) / 2;
    format!(
        "{}{}{}",
        take_prefix(text, side),
        ELLIPSIS,
        take_suffix(text, side)
    )
}

/// 경로를 최대 너비에 맞춰 축약한다 (HOME은 `~`, 넘치면 앞부분 생략).
pub fn truncate_path(path: &Path, max_width: usize) -> String {
    let display = shorten_home(&path.to_string_lossy());
    if display.width() <= max_width {
        return display;
    }
    if max_width <= ELLIPSIS.len() {
        return take_prefix(&display, max_width);
    }
    format!(
        "{}{}",
        ELLIPSIS,
        take_suffix(&display, max_width - ELLIPSIS.len())
    )
}

fn shorten_home(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };
    let home = home.to_string_lossy();
    if home.is_empty() {
        return path.to_string();
    }
    if path == home {
        return "~".to_string();
    }
    match path.strip_prefix(home.as_ref()) {
        Some(rest) if rest.starts_with('/') => format!("~{}", rest),
        _ => path.to_string(),
    }
}

fn take_prefix(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(1);
        if width + w > max_width {
            break;
        }
        result.push(ch);
        width += w;
    }
    result
}

fn take_suffix(text: &str, max_width: usize) -> String {
    let mut chars: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(1);
        if width + w > max_width {
            break;
        }
        chars.push(ch);
        width += w;
    }
    chars.into_iter().rev().collect()
}
