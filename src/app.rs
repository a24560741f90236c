use crate::core::actions::Action;
use crate::models::operation::{MergeEvent, MergeMode, MergeOutcome, MergeProgress};
use crate::models::{MergeQueue, PickerState};
use crate::system::FileSystem;
use crate::ui::components::{DialogKind, StatusKind};
use crate::ui::{ActivePanel, LayoutManager, ThemeManager};
use crate::utils::error::{Result, SheetMergeError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

mod controllers;
mod dialogs;
mod navigation;
mod operations;

/// 설정 파일 경로 override 환경변수
const SETTINGS_ENV_VAR: &str = "SHEETMERGE_SETTINGS_FILE";

/// 키 시퀀스 대기 시간
const PENDING_KEY_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct PersistedSettings {
    version: u32,
    theme: String,
    mode: MergeMode,
    picker_dir: PathBuf,
    excel_only: bool,
}

/// 진행 중인 병합 워커
#[derive(Debug)]
struct MergeWorkerState {
    event_rx: Receiver<MergeEvent>,
    join_handle: Option<JoinHandle<()>>,
    /// 워커가 보낸 최종 결과 (스레드 종료 전에 도착할 수 있다)
    outcome: Option<MergeOutcome>,
}

/// 앱 상태
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저
    pub layout: LayoutManager,
    /// 파일 시스템
    pub filesystem: FileSystem,
    /// 파일 선택 패널
    pub picker: PickerState,
    /// 병합 대기열
    pub queue: MergeQueue,
    /// 병합 모드 (병합 시점에 읽는다)
    pub mode: MergeMode,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 진행률 (마지막 병합 기준)
    pub progress: MergeProgress,
    /// 진행 중인 병합 워커
    merge_worker: Option<MergeWorkerState>,
    /// 상태 메시지
    status: Option<(String, StatusKind)>,
    /// 대기 중인 키 (예: 'g' for 'gg')
    pub pending_key: Option<char>,
    /// 대기 키 입력 시각
    pub pending_key_time: Option<Instant>,
    /// 테스트에서 결과 저장 위치를 격리하기 위한 override
    output_dir_override: Option<PathBuf>,
    /// 테스트에서 설정 저장 경로를 격리하기 위한 override
    state_store_override: Option<PathBuf>,
}

impl App {
    const SETTINGS_VERSION: u32 = 1;

    pub fn new() -> Result<Self> {
        let start_dir = env::current_dir()
            .ok()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut app = Self::with_state(PickerState::new(start_dir), None, None);
        if let Err(err) = app.theme_manager.load_themes_from_config_dir() {
            log::warn!("failed to load custom themes: {}", err);
        }
        app.picker.refresh(&app.filesystem)?;
        app.load_persisted_state();
        Ok(app)
    }

    fn with_state(
        picker: PickerState,
        output_dir_override: Option<PathBuf>,
        state_store_override: Option<PathBuf>,
    ) -> Self {
        Self {
            should_quit: false,
            layout: LayoutManager::new(),
            filesystem: FileSystem::new(),
            picker,
            queue: MergeQueue::new(),
            mode: MergeMode::Unset,
            theme_manager: ThemeManager::new(),
            dialog: None,
            progress: MergeProgress::default(),
            merge_worker: None,
            status: None,
            pending_key: None,
            pending_key_time: None,
            output_dir_override,
            state_store_override,
        }
    }

    /// 테스트용 앱: `dir` 을 탐색하고 결과도 `dir` 에 쓴다.
    #[cfg(test)]
    pub(crate) fn new_for_test(dir: &std::path::Path) -> Self {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static TEST_APP_COUNTER: AtomicUsize = AtomicUsize::new(0);
        let suffix = TEST_APP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let state_store_override = std::env::temp_dir().join(format!(
            "sheetmerge-test-settings-{}-{}.toml",
            std::process::id(),
            suffix
        ));

        let mut app = Self::with_state(
            PickerState::new(dir.to_path_buf()),
            Some(dir.to_path_buf()),
            Some(state_store_override),
        );
        let _ = app.picker.refresh(&app.filesystem);
        app
    }

    /// 종료 (병합 중에는 거부)
    pub fn quit(&mut self) {
        if self.is_merging() {
            self.set_status(
                "Merge in progress, wait for it to finish before quitting",
                StatusKind::Error,
            );
            return;
        }
        if let Err(err) = self.save_persisted_state() {
            log::warn!("failed to save settings: {}", err);
        }
        self.should_quit = true;
    }

    fn state_store_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.state_store_override {
            return Some(path.clone());
        }
        if let Ok(custom) = env::var(SETTINGS_ENV_VAR) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::home_dir().map(|home| home.join(".sheetmerge").join("settings.toml"))
    }

    fn encode_settings(&self) -> std::result::Result<String, toml::ser::Error> {
        let payload = PersistedSettings {
            version: Self::SETTINGS_VERSION,
            theme: self.current_theme_name().to_string(),
            mode: self.mode,
            picker_dir: self.picker.current_path.clone(),
            excel_only: self.picker.excel_only,
        };
        toml::to_string_pretty(&payload)
    }

    fn decode_settings(data: &str) -> Option<PersistedSettings> {
        let parsed: PersistedSettings = toml::from_str(data).ok()?;
        if parsed.version != Self::SETTINGS_VERSION {
            return None;
        }
        if parsed.theme.trim().is_empty() {
            return None;
        }
        Some(parsed)
    }

    fn save_persisted_state(&self) -> Result<()> {
        let Some(path) = self.state_store_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = self
            .encode_settings()
            .map_err(|e| SheetMergeError::Config(e.to_string()))?;
        fs::write(path, data)?;
        Ok(())
    }

    /// 저장된 설정 적용 (실패하면 기본값 유지)
    fn load_persisted_state(&mut self) {
        let Some(path) = self.state_store_path() else {
            return;
        };
        let Ok(data) = fs::read_to_string(path) else {
            return;
        };
        let Some(settings) = Self::decode_settings(&data) else {
            log::debug!("ignoring unreadable settings file");
            return;
        };

        let _ = self.theme_manager.switch_theme(&settings.theme);
        self.mode = settings.mode;
        self.picker.excel_only = settings.excel_only;
        if settings.picker_dir.is_dir() {
            let _ = self
                .picker
                .change_directory(settings.picker_dir, &self.filesystem);
        } else {
            let _ = self.picker.refresh(&self.filesystem);
        }
    }

    fn current_theme_name(&self) -> &str {
        self.theme_manager.current_name()
    }

    fn switch_theme_and_save(&mut self, theme_name: &str) {
        match self.theme_manager.switch_theme(theme_name) {
            Ok(()) => {
                if let Err(err) = self.save_persisted_state() {
                    log::warn!("failed to save settings: {}", err);
                }
                self.set_status(format!("Theme: {}", theme_name), StatusKind::Info);
            }
            Err(message) => self.set_status(message, StatusKind::Error),
        }
    }

    /// 종료 상태 확인
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// 패널 전환 (Tab)
    pub fn toggle_panel(&mut self) {
        self.layout.toggle_panel();
    }

    /// 활성 패널 반환
    pub fn active_panel(&self) -> ActivePanel {
        self.layout.active_panel()
    }

    /// 상태 메시지 설정
    pub fn set_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status = Some((message.into(), kind));
    }

    /// 상태 메시지 (없으면 빈 문자열)
    pub fn status(&self) -> (&str, StatusKind) {
        match &self.status {
            Some((message, kind)) => (message.as_str(), *kind),
            None => ("", StatusKind::Info),
        }
    }

    /// 결과 파일 저장 위치
    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir_override {
            Some(dir) => Ok(dir.clone()),
            None => FileSystem::downloads_dir(),
        }
    }

    // === 키 시퀀스 ===

    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
        self.pending_key_time = Some(Instant::now());
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }

    pub fn is_pending_key_expired(&self) -> bool {
        self.pending_key_time
            .is_some_and(|time| time.elapsed() > PENDING_KEY_TIMEOUT)
    }

    /// 대기 키 표시 문자열 (예: "g-")
    pub fn pending_key_display(&self) -> Option<String> {
        self.pending_key.map(|key| format!("{}-", key))
    }

    /// 액션 실행 (단일 진실 원천)
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::TogglePanel => self.toggle_panel(),
            Action::MoveUp
            | Action::MoveDown
            | Action::GoToParent
            | Action::EnterSelected
            | Action::GoToTop
            | Action::GoToBottom
            | Action::ToggleSelection
            | Action::SelectAll
            | Action::DeselectAll
            | Action::ToggleExcelFilter
            | Action::ToggleHidden
            | Action::Refresh => self.execute_navigation(action),
            Action::ShowHelp
            | Action::SelectMode
            | Action::ThemeDark
            | Action::ThemeLight
            | Action::ThemeContrast => controllers::dialog_controller::execute(self, action),
            Action::AddFiles
            | Action::MoveItemUp
            | Action::MoveItemDown
            | Action::DeleteItem
            | Action::ClearQueue
            | Action::CycleMode
            | Action::Merge => controllers::operation_controller::execute(self, action),
        }
    }
}

#[cfg(test)]
mod tests;
