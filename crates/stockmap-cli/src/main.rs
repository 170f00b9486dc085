//! 한국 주식 종목명-티커 매핑 생성 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 1. KRX에서 KOSPI/KOSDAQ 종목 수집 → scripts/korean_stocks_data.json
//! stockmap collect
//!
//! # 2. JSON → scripts/korean_stocks_maps.ts
//! stockmap render
//!
//! # 수집 + 생성 한 번에
//! stockmap run-all --date 20240102
//!
//! # 오프라인 스냅샷 사용
//! stockmap collect --snapshot data/krx_snapshot.json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockmap_core::{init_logging, LogConfig, LogFormat};

mod commands;

use commands::collect::{collect, CollectArgs};
use commands::render::{render, RenderArgs};

#[derive(Parser)]
#[command(name = "stockmap")]
#[command(about = "한국 주식 종목명-티커 매핑 생성기 (KRX → JSON → TypeScript)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "compact", global = true)]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// KOSPI/KOSDAQ 종목 수집 → 중간 산출물(JSON)
    Collect(CollectArgs),

    /// 중간 산출물(JSON) → TypeScript 매핑 소스
    Render(RenderArgs),

    /// 수집 후 바로 TypeScript 생성
    RunAll {
        #[command(flatten)]
        collect: CollectArgs,

        /// 생성할 TypeScript 파일 경로
        #[arg(long)]
        ts_output: Option<PathBuf>,

        /// `export const`로 선언
        #[arg(long)]
        export: bool,
    },
}

/// 이 워크스페이스 crate에만 지정 레벨을 적용하는 필터
fn log_filter(level: &str) -> String {
    [
        "stockmap",
        "stockmap_core",
        "stockmap_data",
        "stockmap_collector",
        "stockmap_render",
    ]
    .iter()
    .fold("warn".to_string(), |filter, target| {
        format!("{},{}={}", filter, target, level)
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let format: LogFormat = cli.log_format.parse()?;
    init_logging(
        LogConfig::new(log_filter(&cli.log_level))
            .with_format(format)
            .with_env_format(),
    )?;

    match cli.command {
        Commands::Collect(args) => {
            let (config, stats) = collect(&args).await?;
            println!(
                "✅ 총 {}개 종목 수집 완료 → {}",
                stats.success(),
                config.output_path.display()
            );
            println!("   - 매핑 엔트리: {}개", stats.name_entries);
            println!("   - 티커->이름: {}개", stats.ticker_entries);
        }
        Commands::Render(args) => {
            render(&args)?;
        }
        Commands::RunAll {
            collect: collect_args,
            ts_output,
            export,
        } => {
            tracing::info!("=== 전체 워크플로우 시작 ===");

            tracing::info!("Step 1/2: 종목 수집");
            let (config, _) = collect(&collect_args).await?;

            tracing::info!("Step 2/2: TypeScript 생성");
            render(&RenderArgs {
                input: Some(config.output_path),
                output: ts_output,
                export,
            })?;

            tracing::info!("=== 전체 워크플로우 완료 ===");
        }
    }

    Ok(())
}
