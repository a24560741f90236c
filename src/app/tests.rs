use super::*;
use crate::models::table::CellValue;
use crate::system::spreadsheet::read_table;
use crate::system::spreadsheet::tests::{sheet_names_of, write_fixture};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn make_test_app(dir: &Path) -> App {
    App::new_for_test(dir)
}

fn fixture(dir: &Path, name: &str, rows: usize) -> PathBuf {
    let path = dir.join(name);
    let data: Vec<Vec<CellValue>> = (0..rows)
        .map(|i| vec![CellValue::Text(format!("{}-{}", name, i)), CellValue::Int(i as i64)])
        .collect();
    write_fixture(&path, &["name", "value"], &data);
    path
}

fn run_merge_until_done(app: &mut App) {
    let mut guard = 0usize;
    while app.is_merging() && guard < 5_000 {
        app.process_merge_worker();
        std::thread::sleep(std::time::Duration::from_millis(2));
        guard += 1;
    }
    assert!(guard < 5_000, "merge loop guard exceeded");
}

fn outputs_in(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            name.starts_with(prefix) && name.ends_with(".xlsx")
        })
        .collect()
}

#[test]
fn test_merge_with_empty_queue_reports_no_files() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(temp.path());
    app.set_mode(MergeMode::Workbook);

    app.execute_action(Action::Merge);

    assert_eq!(app.status(), ("No files selected!", StatusKind::Error));
    assert!(!app.is_merging());
}

#[test]
fn test_merge_with_unset_mode_starts_no_worker() {
    let temp = TempDir::new().unwrap();
    let a = fixture(temp.path(), "a.xlsx", 1);
    let mut app = make_test_app(temp.path());
    app.add_files(vec![a]);

    app.start_merge();

    assert_eq!(
        app.status().0,
        "Select a merge mode (Workbook or Worksheet) first."
    );
    assert!(!app.is_merging());
    assert!(outputs_in(temp.path(), "a_").is_empty());
}

#[test]
fn test_add_files_marked_in_listing_order() {
    let temp = TempDir::new().unwrap();
    fixture(temp.path(), "b.xlsx", 1);
    fixture(temp.path(), "a.xlsx", 1);
    fixture(temp.path(), "c.xlsx", 1);
    let mut app = make_test_app(temp.path());

    // 0: "..", 1: a, 2: b, 3: c
    app.picker.selected_index = 3;
    app.execute_action(Action::ToggleSelection);
    app.picker.selected_index = 1;
    app.execute_action(Action::ToggleSelection);
    app.execute_action(Action::AddFiles);

    assert_eq!(app.queue.display_names(), vec!["a.xlsx", "c.xlsx"]);
    assert!(app.picker.marked.is_empty());
    assert_eq!(app.status().0, "Added 2 files");
}

#[test]
fn test_enter_on_file_appends_without_dedup() {
    let temp = TempDir::new().unwrap();
    fixture(temp.path(), "a.xlsx", 1);
    let mut app = make_test_app(temp.path());

    app.picker.selected_index = 1;
    app.execute_action(Action::EnterSelected);
    app.execute_action(Action::EnterSelected);

    assert_eq!(app.queue.display_names(), vec!["a.xlsx", "a.xlsx"]);
}

#[test]
fn test_enter_directory_and_back_to_parent() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("reports")).unwrap();
    fixture(&temp.path().join("reports"), "q1.xlsx", 1);
    let mut app = make_test_app(temp.path());

    app.picker.selected_index = 1;
    app.execute_action(Action::EnterSelected);
    assert_eq!(app.picker.current_path, temp.path().join("reports"));
    assert_eq!(app.picker.entries[0].name, "q1.xlsx");

    app.execute_action(Action::GoToParent);
    assert_eq!(app.picker.current_path, temp.path());
    assert_eq!(app.picker.selected_entry().unwrap().name, "reports");
}

#[test]
fn test_queue_reorder_and_delete() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(temp.path());
    app.add_files(vec![
        temp.path().join("a.xlsx"),
        temp.path().join("b.xlsx"),
        temp.path().join("c.xlsx"),
    ]);
    app.toggle_panel();

    app.execute_action(Action::MoveItemDown);
    assert_eq!(app.queue.display_names(), vec!["b.xlsx", "a.xlsx", "c.xlsx"]);
    assert_eq!(app.queue.selected_index(), 1);

    // 경계에서는 변화 없음
    app.execute_action(Action::GoToTop);
    app.execute_action(Action::MoveItemUp);
    assert_eq!(app.queue.display_names(), vec!["b.xlsx", "a.xlsx", "c.xlsx"]);

    app.execute_action(Action::GoToBottom);
    app.execute_action(Action::DeleteItem);
    assert_eq!(app.queue.display_names(), vec!["b.xlsx", "a.xlsx"]);
    assert_eq!(app.queue.selected_index(), 1);

    app.execute_action(Action::ClearQueue);
    assert!(app.queue.is_empty());
}

#[test]
fn test_mode_select_dialog_and_cycle() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(temp.path());

    app.execute_action(Action::SelectMode);
    assert_eq!(app.dialog, Some(DialogKind::ModeSelect { selected_index: 0 }));
    app.dialog_mode_prev();
    assert_eq!(app.dialog, Some(DialogKind::ModeSelect { selected_index: 2 }));
    app.dialog_mode_next();
    app.dialog_mode_next();
    app.confirm_dialog();
    assert_eq!(app.mode, MergeMode::Workbook);
    assert!(app.dialog.is_none());

    app.execute_action(Action::CycleMode);
    assert_eq!(app.mode, MergeMode::Worksheet);
    app.execute_action(Action::CycleMode);
    assert_eq!(app.mode, MergeMode::Unset);
}

#[test]
fn test_workbook_merge_writes_stacked_rows() {
    let temp = TempDir::new().unwrap();
    let a = fixture(temp.path(), "a.xlsx", 2);
    let b = fixture(temp.path(), "b.xlsx", 3);
    let mut app = make_test_app(temp.path());
    app.add_files(vec![a, b]);
    app.set_mode(MergeMode::Workbook);

    app.execute_action(Action::Merge);
    assert!(app.is_merging());
    run_merge_until_done(&mut app);

    let (message, kind) = app.status();
    assert_eq!(kind, StatusKind::Success);
    assert!(message.starts_with("Excel files merged successfully. Merged data saved to "));
    assert_eq!(app.progress.percent, 100);
    assert!(matches!(app.dialog, Some(DialogKind::Message { .. })));

    let outputs = outputs_in(temp.path(), "a_b_");
    assert_eq!(outputs.len(), 1);
    assert!(message.ends_with(&outputs[0].display().to_string()));
    let merged = read_table(&outputs[0]).unwrap();
    assert_eq!(merged.row_count(), 5);
    assert_eq!(merged.columns, vec!["name", "value"]);
}

#[test]
fn test_worksheet_merge_one_sheet_per_file() {
    let temp = TempDir::new().unwrap();
    let a = fixture(temp.path(), "a.xlsx", 1);
    let b = fixture(temp.path(), "b.xlsx", 1);
    let mut app = make_test_app(temp.path());
    app.add_files(vec![b, a]);
    app.set_mode(MergeMode::Worksheet);

    app.start_merge();
    run_merge_until_done(&mut app);

    let outputs = outputs_in(temp.path(), "b_a_");
    assert_eq!(outputs.len(), 1);
    assert_eq!(sheet_names_of(&outputs[0]), vec!["Sheet1", "Sheet2"]);
}

#[test]
fn test_second_merge_rejected_while_running() {
    let temp = TempDir::new().unwrap();
    let a = fixture(temp.path(), "a.xlsx", 1);
    let mut app = make_test_app(temp.path());
    app.add_files(vec![a]);
    app.set_mode(MergeMode::Workbook);

    app.start_merge();
    app.start_merge();
    assert_eq!(
        app.status(),
        ("Merge already in progress", StatusKind::Error)
    );

    // 병합 중에는 대기열이 잠긴다
    app.delete_queue_item();
    assert_eq!(app.queue.len(), 1);

    run_merge_until_done(&mut app);
    assert_eq!(outputs_in(temp.path(), "a_").len(), 1);
}

#[test]
fn test_quit_refused_while_merging() {
    let temp = TempDir::new().unwrap();
    let a = fixture(temp.path(), "a.xlsx", 2);
    let mut app = make_test_app(temp.path());
    app.add_files(vec![a]);
    app.set_mode(MergeMode::Workbook);

    app.start_merge();
    app.execute_action(Action::Quit);
    assert!(!app.should_quit());
    assert_eq!(
        app.status(),
        (
            "Merge in progress, wait for it to finish before quitting",
            StatusKind::Error
        )
    );

    run_merge_until_done(&mut app);
    assert_eq!(outputs_in(temp.path(), "a_").len(), 1);

    app.execute_action(Action::Quit);
    assert!(app.should_quit());
}

#[test]
fn test_merge_failure_reports_single_error() {
    let temp = TempDir::new().unwrap();
    let a = fixture(temp.path(), "a.xlsx", 1);
    let broken = temp.path().join("broken.xlsx");
    fs::write(&broken, "not a workbook").unwrap();
    let mut app = make_test_app(temp.path());
    app.add_files(vec![a, broken]);
    app.set_mode(MergeMode::Worksheet);

    app.start_merge();
    run_merge_until_done(&mut app);

    let (message, kind) = app.status();
    assert_eq!(kind, StatusKind::Error);
    assert!(message.starts_with("Error merging files: "));
    assert!(message.contains("broken.xlsx"));
    assert!(matches!(app.dialog, Some(DialogKind::Error { .. })));
    assert!(outputs_in(temp.path(), "a_broken_").is_empty());
}

#[test]
fn test_settings_encode_decode_roundtrip() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(temp.path());
    app.mode = MergeMode::Worksheet;
    app.picker.excel_only = false;
    app.switch_theme_and_save("light");

    let text = app.encode_settings().unwrap();
    let decoded = App::decode_settings(&text).unwrap();
    assert_eq!(decoded.version, App::SETTINGS_VERSION);
    assert_eq!(decoded.theme, "light");
    assert_eq!(decoded.mode, MergeMode::Worksheet);
    assert_eq!(decoded.picker_dir, temp.path());
    assert!(!decoded.excel_only);
}

#[test]
fn test_settings_wrong_version_rejected() {
    let temp = TempDir::new().unwrap();
    let app = make_test_app(temp.path());
    let text = app.encode_settings().unwrap();

    let bumped = text.replace("version = 1", "version = 2");
    assert!(App::decode_settings(&bumped).is_none());
    assert!(App::decode_settings("not toml [").is_none());
}

#[test]
fn test_settings_saved_on_quit_and_restored() {
    let temp = TempDir::new().unwrap();
    let sub = temp.path().join("inputs");
    fs::create_dir(&sub).unwrap();

    let mut app = make_test_app(temp.path());
    app.set_mode(MergeMode::Workbook);
    app.picker.change_directory(sub.clone(), &app.filesystem).unwrap();
    app.execute_action(Action::ThemeContrast);
    app.execute_action(Action::Quit);
    assert!(app.should_quit());

    let mut restored = make_test_app(temp.path());
    restored.state_store_override = app.state_store_override.clone();
    restored.load_persisted_state();

    assert_eq!(restored.mode, MergeMode::Workbook);
    assert_eq!(restored.theme_manager.current_name(), "high_contrast");
    assert_eq!(restored.picker.current_path, sub);

    if let Some(path) = &app.state_store_override {
        let _ = fs::remove_file(path);
    }
}

#[test]
fn test_unknown_theme_keeps_current() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(temp.path());
    app.switch_theme_and_save("neon");
    assert_eq!(app.theme_manager.current_name(), "dark");
    assert_eq!(
        app.status(),
        (
            "Theme not found: neon (available: dark, light, high_contrast)",
            StatusKind::Error
        )
    );
}

#[test]
fn test_excel_filter_toggle() {
    let temp = TempDir::new().unwrap();
    fixture(temp.path(), "a.xlsx", 1);
    fs::write(temp.path().join("notes.txt"), "x").unwrap();
    let mut app = make_test_app(temp.path());
    assert_eq!(app.picker.entries.len(), 1);

    app.execute_action(Action::ToggleExcelFilter);
    assert_eq!(app.picker.entries.len(), 2);
    assert_eq!(app.status().0, "Showing all files");
}

#[test]
fn test_help_dialog_scroll() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(temp.path());
    app.execute_action(Action::ShowHelp);
    app.dialog_help_scroll_up();
    app.dialog_help_scroll_down();
    app.dialog_help_scroll_down();
    assert_eq!(app.dialog, Some(DialogKind::Help { scroll_offset: 2 }));
    app.close_dialog();
    assert!(!app.is_dialog_active());
}
