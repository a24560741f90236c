//! 액션 시스템: 단일 진실 원천 (Single Source of Truth)
//!
//! 모든 키 바인딩, 커맨드바 항목, 도움말 내용이
//! 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    GoToParent,
    EnterSelected,
    GoToTop,
    GoToBottom,
    TogglePanel,
    // Selection
    ToggleSelection,
    SelectAll,
    DeselectAll,
    // Queue
    AddFiles,
    MoveItemUp,
    MoveItemDown,
    DeleteItem,
    ClearQueue,
    // Merge
    SelectMode,
    CycleMode,
    Merge,
    // View
    ToggleExcelFilter,
    ToggleHidden,
    Refresh,
    // System
    ShowHelp,
    Quit,
    ThemeDark,
    ThemeLight,
    ThemeContrast,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Selection,
    Queue,
    Merge,
    View,
    System,
}

impl ActionCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ActionCategory::Navigation => "Navigation",
            ActionCategory::Selection => "Selection",
            ActionCategory::Queue => "Merge Queue",
            ActionCategory::Merge => "Merge",
            ActionCategory::View => "View",
            ActionCategory::System => "System",
        }
    }
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 시퀀스 키 바인딩 정의 (예: `g` + `g`)
pub struct SequenceBinding {
    pub prefix: char,
    pub key: char,
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    ActionDef {
        action: Action::MoveUp,
        id: "move_up",
        label: "Move up",
        category: ActionCategory::Navigation,
        shortcut_display: Some("j / k"),
        command_bar: None,
    },
    ActionDef {
        action: Action::MoveDown,
        id: "move_down",
        label: "Move down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToParent,
        id: "go_parent",
        label: "Parent dir",
        category: ActionCategory::Navigation,
        shortcut_display: Some("h / Left"),
        command_bar: None,
    },
    ActionDef {
        action: Action::EnterSelected,
        id: "enter",
        label: "Enter dir / add file",
        category: ActionCategory::Navigation,
        shortcut_display: Some("l / Enter"),
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToTop,
        id: "go_top",
        label: "Top",
        category: ActionCategory::Navigation,
        shortcut_display: Some("gg / Home"),
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToBottom,
        id: "go_bottom",
        label: "Bottom",
        category: ActionCategory::Navigation,
        shortcut_display: Some("G / End"),
        command_bar: None,
    },
    ActionDef {
        action: Action::TogglePanel,
        id: "toggle_panel",
        label: "Switch panel",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Tab"),
        command_bar: Some(CommandBarEntry {
            key: "Tab",
            label: "Panel",
            priority: 50,
        }),
    },
    // Selection
    ActionDef {
        action: Action::ToggleSelection,
        id: "toggle_selection",
        label: "Mark file",
        category: ActionCategory::Selection,
        shortcut_display: Some("Space"),
        command_bar: Some(CommandBarEntry {
            key: "Spc",
            label: "Mark",
            priority: 20,
        }),
    },
    ActionDef {
        action: Action::SelectAll,
        id: "select_all",
        label: "Mark all files",
        category: ActionCategory::Selection,
        shortcut_display: Some("Ctrl+A"),
        command_bar: None,
    },
    ActionDef {
        action: Action::DeselectAll,
        id: "deselect_all",
        label: "Clear marks",
        category: ActionCategory::Selection,
        shortcut_display: Some("Ctrl+D"),
        command_bar: None,
    },
    // Queue
    ActionDef {
        action: Action::AddFiles,
        id: "add_files",
        label: "Add files to queue",
        category: ActionCategory::Queue,
        shortcut_display: Some("a"),
        command_bar: Some(CommandBarEntry {
            key: "a",
            label: "Add",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::MoveItemUp,
        id: "move_item_up",
        label: "Move item up",
        category: ActionCategory::Queue,
        shortcut_display: Some("K / Shift+Up"),
        command_bar: Some(CommandBarEntry {
            key: "K/J",
            label: "Order",
            priority: 11,
        }),
    },
    ActionDef {
        action: Action::MoveItemDown,
        id: "move_item_down",
        label: "Move item down",
        category: ActionCategory::Queue,
        shortcut_display: Some("J / Shift+Down"),
        command_bar: None,
    },
    ActionDef {
        action: Action::DeleteItem,
        id: "delete_item",
        label: "Remove item",
        category: ActionCategory::Queue,
        shortcut_display: Some("d / Del"),
        command_bar: Some(CommandBarEntry {
            key: "d",
            label: "Remove",
            priority: 12,
        }),
    },
    ActionDef {
        action: Action::ClearQueue,
        id: "clear_queue",
        label: "Clear queue",
        category: ActionCategory::Queue,
        shortcut_display: Some("X"),
        command_bar: None,
    },
    // Merge
    ActionDef {
        action: Action::SelectMode,
        id: "select_mode",
        label: "Choose merge mode",
        category: ActionCategory::Merge,
        shortcut_display: Some("m"),
        command_bar: Some(CommandBarEntry {
            key: "m",
            label: "Mode",
            priority: 30,
        }),
    },
    ActionDef {
        action: Action::CycleMode,
        id: "cycle_mode",
        label: "Cycle merge mode",
        category: ActionCategory::Merge,
        shortcut_display: Some("M"),
        command_bar: None,
    },
    ActionDef {
        action: Action::Merge,
        id: "merge",
        label: "Merge files",
        category: ActionCategory::Merge,
        shortcut_display: Some("s / F5"),
        command_bar: Some(CommandBarEntry {
            key: "F5",
            label: "Merge",
            priority: 31,
        }),
    },
    // View
    ActionDef {
        action: Action::ToggleExcelFilter,
        id: "toggle_excel_filter",
        label: "Excel files only",
        category: ActionCategory::View,
        shortcut_display: Some("f"),
        command_bar: Some(CommandBarEntry {
            key: "f",
            label: "Filter",
            priority: 40,
        }),
    },
    ActionDef {
        action: Action::ToggleHidden,
        id: "toggle_hidden",
        label: "Show hidden files",
        category: ActionCategory::View,
        shortcut_display: Some("."),
        command_bar: None,
    },
    ActionDef {
        action: Action::Refresh,
        id: "refresh",
        label: "Refresh",
        category: ActionCategory::View,
        shortcut_display: Some("Ctrl+R"),
        command_bar: None,
    },
    // System
    ActionDef {
        action: Action::ShowHelp,
        id: "help",
        label: "Help",
        category: ActionCategory::System,
        shortcut_display: Some("? / F1"),
        command_bar: Some(CommandBarEntry {
            key: "?",
            label: "Help",
            priority: 90,
        }),
    },
    ActionDef {
        action: Action::Quit,
        id: "quit",
        label: "Quit",
        category: ActionCategory::System,
        shortcut_display: Some("q"),
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Quit",
            priority: 99,
        }),
    },
    ActionDef {
        action: Action::ThemeDark,
        id: "theme_dark",
        label: "Dark theme",
        category: ActionCategory::System,
        shortcut_display: Some("td"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ThemeLight,
        id: "theme_light",
        label: "Light theme",
        category: ActionCategory::System,
        shortcut_display: Some("tl"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ThemeContrast,
        id: "theme_contrast",
        label: "High contrast theme",
        category: ActionCategory::System,
        shortcut_display: Some("tc"),
        command_bar: None,
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 종료
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        // 패널
        KeyBinding {
            code: KeyCode::Tab,
            modifiers: None,
            action: Action::TogglePanel,
        },
        // 대기열 순서 (Shift+화살표는 일반 화살표보다 먼저 검사)
        KeyBinding {
            code: KeyCode::Up,
            modifiers: Some(KeyModifiers::SHIFT),
            action: Action::MoveItemUp,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: Some(KeyModifiers::SHIFT),
            action: Action::MoveItemDown,
        },
        KeyBinding {
            code: KeyCode::Char('K'),
            modifiers: None,
            action: Action::MoveItemUp,
        },
        KeyBinding {
            code: KeyCode::Char('J'),
            modifiers: None,
            action: Action::MoveItemDown,
        },
        // 탐색: Vim
        KeyBinding {
            code: KeyCode::Char('j'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Char('k'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Char('h'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::GoToParent,
        },
        KeyBinding {
            code: KeyCode::Left,
            modifiers: None,
            action: Action::GoToParent,
        },
        KeyBinding {
            code: KeyCode::Char('l'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::EnterSelected,
        },
        KeyBinding {
            code: KeyCode::Right,
            modifiers: None,
            action: Action::EnterSelected,
        },
        KeyBinding {
            code: KeyCode::Enter,
            modifiers: None,
            action: Action::EnterSelected,
        },
        // G / Home / End
        KeyBinding {
            code: KeyCode::Char('G'),
            modifiers: None,
            action: Action::GoToBottom,
        },
        KeyBinding {
            code: KeyCode::Home,
            modifiers: None,
            action: Action::GoToTop,
        },
        KeyBinding {
            code: KeyCode::End,
            modifiers: None,
            action: Action::GoToBottom,
        },
        // 선택
        KeyBinding {
            code: KeyCode::Char(' '),
            modifiers: None,
            action: Action::ToggleSelection,
        },
        KeyBinding {
            code: KeyCode::Char('a'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::SelectAll,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::DeselectAll,
        },
        // 대기열
        KeyBinding {
            code: KeyCode::Char('a'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::AddFiles,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::DeleteItem,
        },
        KeyBinding {
            code: KeyCode::Delete,
            modifiers: None,
            action: Action::DeleteItem,
        },
        KeyBinding {
            code: KeyCode::Char('X'),
            modifiers: None,
            action: Action::ClearQueue,
        },
        // 병합
        KeyBinding {
            code: KeyCode::Char('m'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::SelectMode,
        },
        KeyBinding {
            code: KeyCode::Char('M'),
            modifiers: None,
            action: Action::CycleMode,
        },
        KeyBinding {
            code: KeyCode::Char('s'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Merge,
        },
        KeyBinding {
            code: KeyCode::F(5),
            modifiers: None,
            action: Action::Merge,
        },
        // 보기
        KeyBinding {
            code: KeyCode::Char('f'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ToggleExcelFilter,
        },
        KeyBinding {
            code: KeyCode::Char('.'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ToggleHidden,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Refresh,
        },
        // 도움말
        KeyBinding {
            code: KeyCode::Char('?'),
            modifiers: None,
            action: Action::ShowHelp,
        },
        KeyBinding {
            code: KeyCode::F(1),
            modifiers: None,
            action: Action::ShowHelp,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    for binding in key_bindings() {
        let code_matches = binding.code == code;
        let mod_matches = match binding.modifiers {
            None => true, // any modifier
            Some(required) => modifiers == required,
        };
        if code_matches && mod_matches {
            return Some(binding.action);
        }
    }
    None
}

/// 시퀀스 입력(prefix + key)으로 액션 조회
pub fn find_sequence_action(prefix: char, key: char) -> Option<Action> {
    sequence_bindings()
        .iter()
        .find(|binding| binding.prefix == prefix && binding.key == key)
        .map(|binding| binding.action)
}

/// 시퀀스 시작 prefix 여부
pub fn is_sequence_prefix(c: char) -> bool {
    sequence_bindings()
        .iter()
        .any(|binding| binding.prefix == c)
}

fn build_sequence_bindings() -> Vec<SequenceBinding> {
    vec![
        SequenceBinding {
            prefix: 'g',
            key: 'g',
            action: Action::GoToTop,
        },
        SequenceBinding {
            prefix: 't',
            key: 'd',
            action: Action::ThemeDark,
        },
        SequenceBinding {
            prefix: 't',
            key: 'l',
            action: Action::ThemeLight,
        },
        SequenceBinding {
            prefix: 't',
            key: 'c',
            action: Action::ThemeContrast,
        },
    ]
}

static SEQUENCE_BINDINGS: LazyLock<Vec<SequenceBinding>> = LazyLock::new(build_sequence_bindings);

/// 시퀀스 바인딩 목록 조회
pub fn sequence_bindings() -> &'static [SequenceBinding] {
    SEQUENCE_BINDINGS.as_slice()
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    let categories = [
        ActionCategory::Navigation,
        ActionCategory::Selection,
        ActionCategory::Queue,
        ActionCategory::Merge,
        ActionCategory::View,
        ActionCategory::System,
    ];

    categories
        .iter()
        .map(|cat| {
            let items: Vec<(&'static str, &'static str)> = ACTION_DEFS
                .iter()
                .filter(|d| d.category == *cat)
                .filter_map(|d| d.shortcut_display.map(|key| (key, d.label)))
                .collect();
            (cat.title(), items)
        })
        .filter(|(_, items)| !items.is_empty())
        .collect()
}
