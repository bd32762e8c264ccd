use std::path::PathBuf;

use crate::config::{Config, ConfigError};
use crate::form::{FormState, ValidationError};
use crate::persistence::{self, FileStore, StorageError};
use crate::presentation::{render_text_table, ChartError, ChartSlots, PngChartRenderer};
use crate::session::{self, Session};
use crate::ui_cli::{self, FieldAssignment};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 입력값 저장소 오류
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// 제출 시 입력 검증 실패
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 차트 파일 생성 오류
    #[error(transparent)]
    Chart(#[from] ChartError),
    /// 입력 도중 표준 입력이 닫힘
    #[error("input closed before all fields were entered")]
    InputClosed,
}

/// `calculate` 명령 옵션.
#[derive(Debug, Clone, Default)]
pub struct CalculateOptions {
    /// 필드 값을 묻지 않고 저장값과 지정값만 사용
    pub no_prompt: bool,
    pub no_charts: bool,
    pub no_save: bool,
    /// 설정의 차트 폴더 대신 쓸 경로
    pub chart_dir: Option<PathBuf>,
    pub assignments: Vec<FieldAssignment>,
}

/// 입력 → 계산 → 표 출력 → 차트 파일 → 저장 순으로 한 번 실행한다.
pub fn run_calculate(config: &Config, opts: &CalculateOptions) -> Result<(), AppError> {
    let mut session = Session::new(FileStore::open(&config.storage_path)?);
    let mut form = FormState::new();
    let restored = session.restore_into(&mut form);
    if restored > 0 {
        println!("Restored saved inputs for {restored} workflow(s). Press Enter to keep a value.");
    }
    for a in &opts.assignments {
        form.set_text(a.workflow, a.field, a.text.clone());
    }
    if !opts.no_prompt {
        ui_cli::prompt_form(&mut form)?;
    }

    let outcome = match session::calculate(&form) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui_cli::print_validation_error(&e);
            return Err(e.into());
        }
    };
    println!();
    print!("{}", render_text_table(&outcome.rows));

    if !opts.no_charts {
        let dir = opts.chart_dir.clone().unwrap_or_else(|| config.chart_dir.clone());
        let mut renderer = PngChartRenderer::new(dir, config.chart_size());
        let mut slots = ChartSlots::new();
        slots.render_all(&mut renderer, &outcome.charts)?;
        println!("\nCharts:");
        for (slot, _) in &outcome.charts {
            if let Some(path) = slots.get(*slot) {
                println!("  {}", path.display());
            }
        }
    }

    if !opts.no_save {
        session.save(&outcome.inputs)?;
    }
    Ok(())
}

/// 저장된 입력값을 출력한다.
pub fn run_show(config: &Config) -> Result<(), AppError> {
    let store = FileStore::open(&config.storage_path)?;
    let saved = persistence::load(&store);
    if saved.is_empty() {
        println!("No saved inputs in {}.", store.path().display());
    } else {
        ui_cli::print_saved(&saved);
    }
    Ok(())
}

/// 저장된 입력값을 지운다.
pub fn run_clear(config: &Config) -> Result<(), AppError> {
    let mut session = Session::new(FileStore::open(&config.storage_path)?);
    session.clear()?;
    println!("Saved inputs cleared.");
    Ok(())
}
