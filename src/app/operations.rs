use super::*;
use crate::models::merge_queue::MoveDirection;
use crate::models::operation::MergeRequest;
use crate::system::{generate_output_filename, spawn_merge_worker};
use crate::utils::formatter::{filename_timestamp, pluralize};

impl App {
    /// 병합 진행 중 여부
    pub fn is_merging(&self) -> bool {
        self.merge_worker.is_some()
    }

    /// 병합 중에는 대기열을 바꿀 수 없다
    fn ensure_queue_editable(&mut self) -> bool {
        if self.is_merging() {
            self.set_status("Merge already in progress", StatusKind::Error);
            return false;
        }
        true
    }

    // === 대기열 편집 ===

    /// 파일 선택 패널에서 고른 파일을 대기열 끝에 추가
    pub fn add_chosen_files(&mut self) {
        if !self.ensure_queue_editable() {
            return;
        }
        let chosen = self.picker.chosen_paths();
        if chosen.is_empty() {
            self.set_status("No file under cursor", StatusKind::Error);
            return;
        }
        self.add_files(chosen);
        self.picker.clear_marks();
    }

    /// 경로들을 선택 순서대로 추가 (중복 허용)
    pub fn add_files(&mut self, paths: Vec<PathBuf>) {
        let added = self.queue.add_files(paths);
        log::debug!("added {} files to queue", added);
        self.set_status(
            format!("Added {}", pluralize(added, "file", "files")),
            StatusKind::Info,
        );
        self.sync_scroll();
    }

    /// 커서 항목을 위/아래로 한 칸 이동
    pub fn move_queue_item(&mut self, direction: MoveDirection) {
        if !self.ensure_queue_editable() {
            return;
        }
        let moved = match direction {
            MoveDirection::Up => self.queue.move_selected_up(),
            MoveDirection::Down => self.queue.move_selected_down(),
        };
        if moved {
            self.sync_scroll();
        }
    }

    /// 커서 항목 삭제
    pub fn delete_queue_item(&mut self) {
        if !self.ensure_queue_editable() {
            return;
        }
        if let Some(removed) = self.queue.delete_selected() {
            self.set_status(
                format!("Removed {}", crate::utils::path_display::base_name(&removed)),
                StatusKind::Info,
            );
            self.sync_scroll();
        }
    }

    /// 대기열 비우기
    pub fn clear_queue(&mut self) {
        if !self.ensure_queue_editable() {
            return;
        }
        self.queue.clear();
        self.set_status("Queue cleared", StatusKind::Info);
    }

    // === 병합 모드 ===

    /// 병합 모드 설정 (빈 자리표시는 Unset)
    pub fn set_mode(&mut self, mode: MergeMode) {
        self.mode = mode;
        let label = if mode.is_set() { mode.label() } else { "none" };
        self.set_status(format!("Merge mode: {}", label), StatusKind::Info);
    }

    /// 다음 모드로 순환
    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    // === 병합 ===

    /// 병합 시작
    ///
    /// 전제 조건을 통과하면 대기열 스냅샷으로 워커 스레드를 띄운다.
    pub fn start_merge(&mut self) {
        if self.is_merging() {
            self.set_status("Merge already in progress", StatusKind::Error);
            return;
        }
        if self.queue.is_empty() {
            self.set_status("No files selected!", StatusKind::Error);
            return;
        }
        if !self.mode.is_set() {
            self.set_status(
                "Select a merge mode (Workbook or Worksheet) first.",
                StatusKind::Error,
            );
            return;
        }

        let output_dir = match self.output_dir() {
            Ok(dir) => dir,
            Err(err) => {
                let outcome = MergeOutcome::Failure {
                    error: err.to_string(),
                };
                self.set_status(outcome.message(), StatusKind::Error);
                return;
            }
        };

        let files = self.queue.snapshot();
        let timestamp = filename_timestamp(chrono::Local::now());
        let output_path = output_dir.join(generate_output_filename(&files, &timestamp));

        self.progress = MergeProgress::new(files.len());
        self.set_status(
            format!("Merging {}...", pluralize(files.len(), "file", "files")),
            StatusKind::Info,
        );

        let (event_rx, join_handle) = spawn_merge_worker(MergeRequest {
            files,
            mode: self.mode,
            output_path,
        });
        self.merge_worker = Some(MergeWorkerState {
            event_rx,
            join_handle: Some(join_handle),
            outcome: None,
        });
    }

    /// 워커 이벤트 반영 (메인 루프에서 매 tick 호출)
    pub fn process_merge_worker(&mut self) {
        let Some(worker) = &mut self.merge_worker else {
            return;
        };

        Self::drain_events(worker, &mut self.progress);

        let is_finished = worker
            .join_handle
            .as_ref()
            .is_some_and(JoinHandle::is_finished);
        if !is_finished {
            return;
        }

        // 종료 직전에 보낸 이벤트까지 수거
        Self::drain_events(worker, &mut self.progress);

        let Some(mut worker) = self.merge_worker.take() else {
            return;
        };
        let joined = worker
            .join_handle
            .take()
            .map_or(Ok(()), |handle| handle.join());
        if joined.is_err() {
            log::error!("merge worker panicked");
        }

        let outcome = worker.outcome.take().unwrap_or_else(|| MergeOutcome::Failure {
            error: SheetMergeError::WorkerPanicked.to_string(),
        });
        self.finish_merge(outcome);
    }

    fn drain_events(worker: &mut MergeWorkerState, progress: &mut MergeProgress) {
        while let Ok(event) = worker.event_rx.try_recv() {
            match event {
                MergeEvent::Progress {
                    loaded,
                    total,
                    percent,
                    current_file,
                } => progress.apply(loaded, total, percent, current_file),
                MergeEvent::Finished(outcome) => {
                    if worker.outcome.is_none() {
                        worker.outcome = Some(outcome);
                    }
                }
            }
        }
    }

    /// 최종 결과를 상태줄과 결과 다이얼로그로 표시
    fn finish_merge(&mut self, outcome: MergeOutcome) {
        let message = outcome.message();
        if outcome.is_success() {
            // 결과 파일이 현재 디렉토리에 생겼을 수 있다
            self.refresh_current();
            self.dialog = Some(DialogKind::message("Merge Complete", &message));
            self.set_status(message, StatusKind::Success);
        } else {
            self.dialog = Some(DialogKind::error("Merge Failed", &message));
            self.set_status(message, StatusKind::Error);
        }
    }
}
