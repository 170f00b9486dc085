//! `collect` 명령: KRX → 중간 산출물(JSON).

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use stockmap_collector::config::parse_base_date;
use stockmap_collector::{run_collect, CollectionStats, CollectorConfig, SourceConfig};

/// 수집 옵션 (지정하지 않으면 환경변수/기본값 사용)
#[derive(Debug, Clone, Default, Args)]
pub struct CollectArgs {
    /// 중간 산출물(JSON) 저장 경로
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// KRX 대신 사용할 스냅샷 파일 ({"KOSPI": {"005930": "삼성전자"}, ...})
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// 별칭 규칙 TOML 파일
    #[arg(long)]
    pub aliases: Option<PathBuf>,

    /// 기준일 (YYYYMMDD, 기본: 오늘)
    #[arg(long)]
    pub date: Option<String>,
}

impl CollectArgs {
    /// 환경변수 설정 위에 명령행 옵션을 덮어씁니다.
    pub fn apply(&self, mut config: CollectorConfig) -> Result<CollectorConfig> {
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(snapshot) = &self.snapshot {
            config.source = SourceConfig::Snapshot(snapshot.clone());
        }
        if let Some(aliases) = &self.aliases {
            config.alias_file = Some(aliases.clone());
        }
        if let Some(date) = &self.date {
            config.base_date = Some(parse_base_date(date)?);
        }
        Ok(config)
    }
}

/// 종목 수집 후 중간 산출물 저장
pub async fn collect(args: &CollectArgs) -> Result<(CollectorConfig, CollectionStats)> {
    let config = args.apply(CollectorConfig::from_env()?)?;
    tracing::debug!(?config, "수집 설정");

    let stats = run_collect(&config)
        .await
        .with_context(|| format!("종목 수집 실패 ({})", config.output_path.display()))?;
    stats.log_summary("종목 수집");

    Ok((config, stats))
}
