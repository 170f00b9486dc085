//! `render` 명령: 중간 산출물(JSON) → TypeScript 소스.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use stockmap_render::{run_render, RenderConfig, RenderSummary};

/// 렌더링 옵션
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// 중간 산출물(JSON) 경로
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 생성할 TypeScript 파일 경로
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// `export const`로 선언
    #[arg(long)]
    pub export: bool,
}

impl RenderArgs {
    pub fn apply(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if self.export {
            config.export = true;
        }
        config
    }
}

/// TypeScript 매핑 파일 생성
pub fn render(args: &RenderArgs) -> Result<RenderSummary> {
    let config = args.apply(RenderConfig::from_env());

    let summary = run_render(&config).with_context(|| {
        format!(
            "TypeScript 생성 실패 ({} → {})",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    println!("✅ TypeScript 파일 생성 완료: {}", summary.output_path.display());
    println!("   - Stock map: {}개", summary.name_entries);
    println!("   - Ticker to name: {}개", summary.ticker_entries);
    println!("   파일 크기: {} bytes", summary.bytes);

    Ok(summary)
}
