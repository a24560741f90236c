//! 파일 로거
//!
//! 터미널이 raw 모드이므로 stderr 대신 `~/.sheetmerge/sheetmerge.log`에 기록한다.
//! `SHEETMERGE_LOG` 환경변수가 설정된 경우에만 설치된다 (값 = 레벨, 예: `debug`).

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

pub const LOG_ENV_VAR: &str = "SHEETMERGE_LOG";

struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn format_line(record: &Record) -> String {
    format!(
        "{} {:<5} [{}] {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// 기본 로그 파일 경로
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".sheetmerge").join("sheetmerge.log"))
}

/// 환경변수 값을 레벨 필터로 해석 (알 수 없는 값은 info)
pub fn parse_level(value: &str) -> LevelFilter {
    LevelFilter::from_str(value.trim()).unwrap_or(LevelFilter::Info)
}

/// 로거 설치. 환경변수가 없거나 파일을 열 수 없으면 아무것도 하지 않는다.
pub fn init_from_env() {
    let Ok(value) = std::env::var(LOG_ENV_VAR) else {
        return;
    };
    let Some(path) = default_log_path() else {
        return;
    };
    let _ = init(&path, parse_level(&value));
}

pub fn init(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    log::set_boxed_logger(Box::new(FileLogger {
        level,
        file: Mutex::new(file),
    }))
    .map_err(|e| anyhow::anyhow!("logger already installed: {}", e))?;
    log::set_max_level(level);
    Ok(())
}
