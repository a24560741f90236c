mod app;
mod core;
mod models;
mod system;
mod ui;
mod utils;

use app::App;
use core::actions::{find_action, find_sequence_action, is_sequence_prefix, Action};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use ui::components::{
    CommandBar, Dialog, DialogKind, Panel, PanelStatus, ProgressBar, QueuePanel, StatusBar,
    TitleBar, WarningScreen,
};
use ui::{ActivePanel, LayoutMode};
use utils::{error::Result, formatter::pluralize, logger, path_display::truncate_path};

/// 병합 중 비활성화되는 커맨드바 키
const MERGE_LOCKED_KEYS: [&str; 5] = ["a", "K/J", "d", "F5", "q"];

fn main() -> Result<()> {
    logger::init_from_env();
    log::info!("sheetmerge starting");

    // Create app
    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("terminal loop failed: {}", err);
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let size = f.area();

            // 레이아웃 업데이트
            app.layout.update(size);
            app.sync_scroll();

            match app.layout.mode() {
                LayoutMode::TooSmall => {
                    // 경고 화면 표시
                    let (width, height) = app.layout.terminal_size();
                    let percent = app.is_merging().then_some(app.progress.percent);
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .merge_percent(percent)
                        .theme(app.theme_manager.current());
                    f.render_widget(warning, size);
                }
                LayoutMode::DualPanel | LayoutMode::SinglePanel => {
                    render_main_ui(f, app);
                }
            }
        })?;

        // 병합 중에는 진행률 갱신을 위해 짧은 타임아웃
        let poll_timeout = if app.is_merging() || app.pending_key.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(200)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.is_dialog_active() {
                        handle_dialog_keys(app, key.modifiers, key.code);
                    } else {
                        handle_normal_keys(app, key.modifiers, key.code);
                    }
                }
            }
        }

        // pending 키 타임아웃 체크
        if app.pending_key.is_some() && app.is_pending_key_expired() {
            app.clear_pending_key();
        }

        app.process_merge_worker();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    // 1) pending 키 시퀀스 처리 (gg, td/tl/tc)
    if let Some(pending) = app.pending_key {
        app.clear_pending_key();
        if let KeyCode::Char(c) = code {
            if let Some(action) = find_sequence_action(pending, c) {
                app.execute_action(action);
                return;
            }
        }
    }

    // 2) 시퀀스 시작 키
    if modifiers == KeyModifiers::NONE {
        if let KeyCode::Char(c) = code {
            if is_sequence_prefix(c) {
                app.set_pending_key(c);
                return;
            }
        }
    }

    // 3) 테이블 조회 → 액션 실행
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

/// 다이얼로그 모드 키 처리
fn handle_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        app.execute_action(Action::Quit);
        return;
    }

    let Some(kind) = app.dialog.clone() else {
        return;
    };

    match kind {
        DialogKind::Help { .. } => match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
                app.close_dialog();
            }
            KeyCode::Char('j') | KeyCode::Down => app.dialog_help_scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => app.dialog_help_scroll_up(),
            _ => {}
        },
        DialogKind::ModeSelect { .. } => match code {
            KeyCode::Char('k') | KeyCode::Up => app.dialog_mode_prev(),
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.dialog_mode_next(),
            KeyCode::Enter => app.confirm_dialog(),
            KeyCode::Esc | KeyCode::Char('q') => app.close_dialog(),
            _ => {}
        },
        DialogKind::Error { .. } | DialogKind::Message { .. } => match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => app.close_dialog(),
            _ => {}
        },
    }
}

/// 파일 선택 패널 렌더링
fn render_picker(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, is_active: bool) {
    let area = app.layout.areas().picker_panel;
    if area.width == 0 {
        return;
    }
    let picker = &app.picker;
    let panel = Panel::new()
        .path(&picker.current_path)
        .status(if is_active {
            PanelStatus::Active
        } else {
            PanelStatus::Inactive
        })
        .entries(&picker.entries)
        .selected_index(picker.selected_index)
        .scroll_offset(picker.scroll_offset)
        .show_parent(picker.has_parent())
        .marked(&picker.marked)
        .excel_only(picker.excel_only)
        .theme(theme);
    f.render_widget(panel, area);
}

/// 대기열 패널 렌더링
fn render_queue(f: &mut ratatui::Frame<'_>, app: &App, theme: &ui::Theme, is_active: bool) {
    let area = app.layout.areas().queue_panel;
    if area.width == 0 {
        return;
    }
    let names = app.queue.display_names();
    let panel = QueuePanel::new()
        .names(&names)
        .status(if is_active {
            PanelStatus::Active
        } else {
            PanelStatus::Inactive
        })
        .selected_index(app.queue.selected_index())
        .scroll_offset(app.queue.scroll_offset)
        .locked(app.is_merging())
        .theme(theme);
    f.render_widget(panel, area);
}

/// 메인 UI 렌더링
fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = app.layout.areas();
    let active_panel = app.layout.active_panel();
    let theme = app.theme_manager.current();

    let output_dir = match app.output_dir() {
        Ok(dir) => truncate_path(&dir, (areas.title_bar.width / 2) as usize),
        Err(_) => "-".to_string(),
    };
    let right_label = app
        .pending_key_display()
        .unwrap_or_else(|| app.theme_manager.current_name().to_string());
    let title_bar = TitleBar::new()
        .output_dir(&output_dir)
        .right_label(&right_label)
        .theme(theme);
    f.render_widget(title_bar, areas.title_bar);

    render_picker(f, app, theme, active_panel == ActivePanel::Picker);
    render_queue(f, app, theme, active_panel == ActivePanel::Queue);

    let current_file = (app.is_merging() && !app.progress.current_file.is_empty())
        .then_some(app.progress.current_file.as_str());
    let progress_bar = ProgressBar::new()
        .mode(app.mode)
        .percent(app.progress.percent)
        .current_file(current_file)
        .theme(theme);
    f.render_widget(progress_bar, areas.progress_bar);

    let (message, kind) = app.status();
    let summary = format!("{} in queue", pluralize(app.queue.len(), "file", "files"));
    let status_bar = StatusBar::new()
        .message(message, kind)
        .summary(&summary)
        .theme(theme);
    f.render_widget(status_bar, areas.status_bar);

    let mut command_bar = CommandBar::new().theme(theme);
    if app.is_merging() {
        command_bar = command_bar.disable_keys(&MERGE_LOCKED_KEYS);
    }
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref dialog_kind) = app.dialog {
        let dialog = Dialog::new(dialog_kind).theme(theme);
        f.render_widget(dialog, f.area());
    }
}
