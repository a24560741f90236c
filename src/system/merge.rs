//! 병합 워커
//!
//! 대기열 스냅샷을 받아 모든 파일을 읽은 뒤 모드에 따라 하나의 파일로 저장한다.
//! 진행률과 최종 결과는 `mpsc` 채널로 메인 루프에 전달된다.

use crate::models::operation::{load_percentage, MergeEvent, MergeMode, MergeOutcome, MergeRequest};
use crate::models::table::Table;
use crate::system::spreadsheet::{read_table, write_sheets, write_single_sheet};
use crate::utils::error::{Result, SheetMergeError};
use crate::utils::path_display::base_name;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

/// 출력 파일 이름 최대 길이 (문자 수, 확장자 포함)
pub const MAX_OUTPUT_NAME_LEN: usize = 80;
/// 출력 파일 확장자
pub const OUTPUT_EXTENSION: &str = ".xlsx";

/// 입력 파일 이름들로 출력 파일 이름 생성
///
/// `<stem1>_<stem2>_…` 을 잘라 `_<timestamp>.xlsx` 를 붙였을 때
/// 전체 길이가 80자를 넘지 않게 한다.
pub fn generate_output_filename(paths: &[PathBuf], timestamp: &str) -> String {
    let joined = paths
        .iter()
        .map(|path| file_stem(path))
        .collect::<Vec<_>>()
        .join("_");

    let budget = MAX_OUTPUT_NAME_LEN
        .saturating_sub(1 + timestamp.chars().count() + OUTPUT_EXTENSION.len());
    let truncated: String = joined.chars().take(budget).collect();

    format!("{}_{}{}", truncated, timestamp, OUTPUT_EXTENSION)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 병합 실행 (워커 스레드 본문)
///
/// 파일을 하나 읽을 때마다 `MergeEvent::Progress` 를 보낸다.
/// 모든 파일을 읽은 뒤에만 쓰기를 시작하므로 읽기 실패 시 출력 파일은 생기지 않는다.
pub fn run_merge(request: &MergeRequest, progress_tx: &Sender<MergeEvent>) -> Result<PathBuf> {
    if !request.mode.is_set() {
        return Err(SheetMergeError::ModeNotSelected);
    }

    let total = request.files.len();
    log::info!(
        "merge started: mode={}, files={}, output={}",
        request.mode.label(),
        total,
        request.output_path.display()
    );

    let mut tables = Vec::with_capacity(total);
    for (index, path) in request.files.iter().enumerate() {
        let table = read_table(path)?;
        log::debug!(
            "loaded {} ({} rows, {} columns)",
            path.display(),
            table.row_count(),
            table.column_count()
        );
        tables.push(table);

        let loaded = index + 1;
        // 수신 측이 사라져도 병합은 계속한다
        let _ = progress_tx.send(MergeEvent::Progress {
            loaded,
            total,
            percent: load_percentage(loaded, total),
            current_file: base_name(path),
        });
    }

    match request.mode {
        MergeMode::Workbook => {
            let merged = Table::concat(&tables);
            log::debug!("concatenated {} rows", merged.row_count());
            write_single_sheet(&merged, &request.output_path)?;
        }
        MergeMode::Worksheet => write_sheets(&tables, &request.output_path)?,
        MergeMode::Unset => return Err(SheetMergeError::ModeNotSelected),
    }

    Ok(request.output_path.clone())
}

/// 결과를 최종 이벤트로 변환
pub fn outcome_of(result: Result<PathBuf>) -> MergeOutcome {
    match result {
        Ok(output_path) => {
            log::info!("merge finished: {}", output_path.display());
            MergeOutcome::Success { output_path }
        }
        Err(err) => {
            log::error!("merge failed: {}", err);
            MergeOutcome::Failure {
                error: err.to_string(),
            }
        }
    }
}

/// 백그라운드 스레드에서 병합 시작
///
/// 채널에는 진행 이벤트들과 마지막 `MergeEvent::Finished` 하나가 전달된다.
pub fn spawn_merge_worker(request: MergeRequest) -> (Receiver<MergeEvent>, JoinHandle<()>) {
    let (event_tx, event_rx) = mpsc::channel::<MergeEvent>();
    let handle = std::thread::spawn(move || {
        let outcome = outcome_of(run_merge(&request, &event_tx));
        let _ = event_tx.send(MergeEvent::Finished(outcome));
    });
    (event_rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::CellValue;
    use crate::system::spreadsheet::tests::{sheet_names_of, write_fixture, write_offset_fixture};
    use crate::system::spreadsheet::read_table;
    use std::fs;
    use tempfile::TempDir;

    fn rows(values: &[i64]) -> Vec<Vec<CellValue>> {
        values
            .iter()
            .map(|v| vec![CellValue::Text(format!("r{}", v)), CellValue::Int(*v)])
            .collect()
    }

    fn fixture(dir: &Path, name: &str, values: &[i64]) -> PathBuf {
        let path = dir.join(name);
        write_fixture(&path, &["name", "value"], &rows(values));
        path
    }

    fn collect_events(rx: Receiver<MergeEvent>, handle: JoinHandle<()>) -> Vec<MergeEvent> {
        handle.join().expect("worker should not panic");
        rx.try_iter().collect()
    }

    #[test]
    fn test_output_filename_joins_stems() {
        let paths = vec![PathBuf::from("/x/a.xlsx"), PathBuf::from("/y/b.xlsx")];
        assert_eq!(
            generate_output_filename(&paths, "20240101120000"),
            "a_b_20240101120000.xlsx"
        );
    }

    #[test]
    fn test_output_filename_strips_only_last_extension() {
        let paths = vec![PathBuf::from("report.v2.xlsx")];
        assert_eq!(
            generate_output_filename(&paths, "20240101120000"),
            "report.v2_20240101120000.xlsx"
        );
    }

    #[test]
    fn test_output_filename_truncated_to_limit() {
        let paths: Vec<PathBuf> = (0..12)
            .map(|i| PathBuf::from(format!("quarterly_report_{:02}.xlsx", i)))
            .collect();
        let first = generate_output_filename(&paths, "20240101120000");
        let second = generate_output_filename(&paths, "20240101120000");

        assert_eq!(first, second);
        assert_eq!(first.chars().count(), MAX_OUTPUT_NAME_LEN);
        assert!(first.starts_with("quarterly_report_00_quarterly_report_01_"));
        assert!(first.ends_with("_20240101120000.xlsx"));
    }

    #[test]
    fn test_output_filename_truncates_by_chars() {
        let paths = vec![PathBuf::from(format!("{}.xlsx", "가".repeat(70)))];
        let name = generate_output_filename(&paths, "20240101120000");
        assert_eq!(name.chars().count(), MAX_OUTPUT_NAME_LEN);
    }

    #[test]
    fn test_workbook_mode_stacks_rows() {
        let temp = TempDir::new().unwrap();
        let a = fixture(temp.path(), "a.xlsx", &[1, 2]);
        let b = fixture(temp.path(), "b.xlsx", &[3, 4, 5]);
        let output = temp.path().join("merged.xlsx");

        let (rx, handle) = spawn_merge_worker(MergeRequest {
            files: vec![a, b],
            mode: MergeMode::Workbook,
            output_path: output.clone(),
        });
        let events = collect_events(rx, handle);

        assert_eq!(
            events.last(),
            Some(&MergeEvent::Finished(MergeOutcome::Success {
                output_path: output.clone()
            }))
        );
        let merged = read_table(&output).unwrap();
        assert_eq!(merged.columns, vec!["name", "value"]);
        assert_eq!(merged.row_count(), 5);
        assert_eq!(merged.rows[0][0], CellValue::Text("r1".into()));
        assert_eq!(merged.rows[4][0], CellValue::Text("r5".into()));
        assert_eq!(sheet_names_of(&output), vec!["Sheet1"]);
    }

    #[test]
    fn test_worksheet_mode_one_sheet_per_file() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            fixture(temp.path(), "one.xlsx", &[1]),
            fixture(temp.path(), "two.xlsx", &[2, 3]),
            fixture(temp.path(), "three.xlsx", &[4]),
        ];
        let output = temp.path().join("sheets.xlsx");
        let (tx, _rx) = mpsc::channel();

        let result = run_merge(
            &MergeRequest {
                files,
                mode: MergeMode::Worksheet,
                output_path: output.clone(),
            },
            &tx,
        );

        assert_eq!(result.unwrap(), output);
        assert_eq!(sheet_names_of(&output), vec!["Sheet1", "Sheet2", "Sheet3"]);

        let mut workbook: calamine::Xlsx<_> = calamine::open_workbook(&output).unwrap();
        use calamine::Reader;
        let second = workbook.worksheet_range("Sheet2").unwrap();
        assert_eq!(second.height(), 3);
    }

    #[test]
    fn test_worksheet_mode_keeps_column_positions() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("offset.xlsx");
        write_offset_fixture(&source);
        let output = temp.path().join("sheets.xlsx");
        let (tx, _rx) = mpsc::channel();

        run_merge(
            &MergeRequest {
                files: vec![source],
                mode: MergeMode::Worksheet,
                output_path: output.clone(),
            },
            &tx,
        )
        .unwrap();

        use calamine::{Data, Reader};
        let mut workbook: calamine::Xlsx<_> = calamine::open_workbook(&output).unwrap();
        let sheet = workbook.worksheet_range("Sheet1").unwrap();
        assert_eq!(sheet.get_value((0, 1)), Some(&Data::String("name".into())));
        assert_eq!(sheet.get_value((0, 2)), Some(&Data::String("qty".into())));
        assert_eq!(sheet.get_value((1, 1)), Some(&Data::String("apple".into())));
        assert_eq!(sheet.get_value((1, 2)), Some(&Data::Float(3.0)));
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let temp = TempDir::new().unwrap();
        let files = vec![
            fixture(temp.path(), "a.xlsx", &[1]),
            fixture(temp.path(), "b.xlsx", &[2]),
            fixture(temp.path(), "c.xlsx", &[3]),
        ];
        let (rx, handle) = spawn_merge_worker(MergeRequest {
            files,
            mode: MergeMode::Workbook,
            output_path: temp.path().join("out.xlsx"),
        });
        let events = collect_events(rx, handle);

        let percents: Vec<u8> = events
            .iter()
            .filter_map(|event| match event {
                MergeEvent::Progress { percent, .. } => Some(*percent),
                MergeEvent::Finished(_) => None,
            })
            .collect();
        assert_eq!(percents, vec![33, 66, 100]);

        let finished = events
            .iter()
            .filter(|event| matches!(event, MergeEvent::Finished(_)))
            .count();
        assert_eq!(finished, 1);
    }

    #[test]
    fn test_corrupt_input_fails_without_output() {
        let temp = TempDir::new().unwrap();
        let good = fixture(temp.path(), "good.xlsx", &[1]);
        let bad = temp.path().join("broken.xlsx");
        fs::write(&bad, b"not a workbook").unwrap();
        let output = temp.path().join("out.xlsx");

        let (rx, handle) = spawn_merge_worker(MergeRequest {
            files: vec![good, bad],
            mode: MergeMode::Workbook,
            output_path: output.clone(),
        });
        let events = collect_events(rx, handle);

        match events.last() {
            Some(MergeEvent::Finished(outcome)) => {
                assert!(!outcome.is_success());
                let message = outcome.message();
                assert!(message.starts_with("Error merging files: "));
                assert!(message.contains("broken.xlsx"));
            }
            other => panic!("unexpected final event: {:?}", other),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_output_directory_is_write_failure() {
        let temp = TempDir::new().unwrap();
        let a = fixture(temp.path(), "a.xlsx", &[1]);
        let (tx, _rx) = mpsc::channel();

        let err = run_merge(
            &MergeRequest {
                files: vec![a],
                mode: MergeMode::Worksheet,
                output_path: temp.path().join("no-such-dir").join("out.xlsx"),
            },
            &tx,
        )
        .unwrap_err();
        assert!(matches!(err, SheetMergeError::SpreadsheetWrite(_)));
    }

    #[test]
    fn test_unset_mode_is_rejected() {
        let (tx, rx) = mpsc::channel();
        let err = run_merge(
            &MergeRequest {
                files: vec![PathBuf::from("a.xlsx")],
                mode: MergeMode::Unset,
                output_path: PathBuf::from("out.xlsx"),
            },
            &tx,
        )
        .unwrap_err();
        assert!(matches!(err, SheetMergeError::ModeNotSelected));
        assert!(rx.try_recv().is_err());
    }
}
