use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use plate_cost_calculator::{app, config, logging, ui_cli};

/// 무현상판 / 기존 현상판 월 비용 비교 계산기 (CLI)
#[derive(Debug, Parser)]
#[command(name = "plate_cost_calculator_cli", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 입력값을 받아 두 공정의 비용을 비교한다 (기본 명령)
    Calculate(CalculateArgs),
    /// 저장된 입력값을 출력한다
    Show,
    /// 저장된 입력값을 지운다
    Clear,
}

#[derive(Debug, Default, Args)]
struct CalculateArgs {
    /// 필드 값 지정, 예: --set fl-work-days=22
    #[arg(long = "set", value_name = "ID=VALUE", value_parser = ui_cli::parse_field_assignment)]
    assignments: Vec<ui_cli::FieldAssignment>,
    /// 값을 묻지 않고 저장값과 --set 값만 사용
    #[arg(long)]
    no_prompt: bool,
    /// 차트 PNG를 만들지 않음
    #[arg(long)]
    no_charts: bool,
    /// 입력값을 저장하지 않음
    #[arg(long)]
    no_save: bool,
    /// 차트 출력 폴더
    #[arg(long)]
    chart_dir: Option<PathBuf>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        if !already_reported(&err) {
            eprintln!("Error: {err:#}");
        }
        std::process::exit(1);
    }
}

/// 검증 실패는 `run_calculate`가 이미 안내문을 출력했다.
fn already_reported(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<app::AppError>(), Some(app::AppError::Validation(_)))
}

fn try_run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;
    logging::init(&cfg.log_level);
    tracing::info!(config = %cfg.path().display(), "application initialized");

    match cli.command.unwrap_or_else(|| Command::Calculate(CalculateArgs::default())) {
        Command::Calculate(args) => {
            let opts = app::CalculateOptions {
                no_prompt: args.no_prompt,
                no_charts: args.no_charts,
                no_save: args.no_save,
                chart_dir: args.chart_dir,
                assignments: args.assignments,
            };
            app::run_calculate(&cfg, &opts)?;
        }
        Command::Show => app::run_show(&cfg)?,
        Command::Clear => app::run_clear(&cfg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plate_cost_calculator::form::FormState;

    #[test]
    fn validation_failure_is_not_reported_twice() {
        let validation = FormState::new().validate().unwrap_err();
        let err = anyhow::Error::from(app::AppError::from(validation));
        assert!(already_reported(&err));

        let io = app::AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!already_reported(&anyhow::Error::from(io)));
    }
}
