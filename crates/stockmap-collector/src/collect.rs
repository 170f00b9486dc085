//! 종목 수집 모듈.

use crate::{CollectionStats, CollectorConfig, MarketConfig, MarketStats, SourceConfig};
use chrono::NaiveDate;
use std::time::Instant;
use stockmap_core::{AliasRules, InterchangeDocument, Listing, Result, StockMapError};
use stockmap_data::{KrxListingProvider, ListingProvider, SnapshotListingProvider};

/// 설정에 맞는 데이터 소스 생성
pub fn build_provider(source: &SourceConfig) -> Result<Box<dyn ListingProvider>> {
    let provider: Box<dyn ListingProvider> = match source {
        SourceConfig::Krx(options) => Box::new(
            KrxListingProvider::with_options(options.clone())
                .map_err(|e| StockMapError::DependencyUnavailable(e.to_string()))?,
        ),
        SourceConfig::Snapshot(path) => Box::new(
            SnapshotListingProvider::from_path(path)
                .map_err(|e| StockMapError::DependencyUnavailable(e.to_string()))?,
        ),
    };
    Ok(provider)
}

/// 시장 순서대로 종목을 수집하여 중간 산출물을 만듭니다.
///
/// 시장 전체 목록 조회가 실패하면 즉시 중단하고 이후 시장은 조회하지 않습니다.
/// 개별 종목명 조회 실패는 경고 후 해당 종목만 건너뜁니다.
pub async fn collect_document(
    provider: &dyn ListingProvider,
    markets: &[MarketConfig],
    rules: &AliasRules,
    base_date: NaiveDate,
) -> Result<(InterchangeDocument, CollectionStats)> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();
    let mut document = InterchangeDocument::new();
    let no_rules = AliasRules::empty();

    for market_config in markets {
        let market = market_config.market;
        tracing::info!(%market, provider = provider.name(), base_date = %base_date, "종목 수집 시작");

        let codes = provider
            .list_tickers(market, base_date)
            .await
            .map_err(|e| StockMapError::ExchangeFetchFailed {
                market: market.to_string(),
                reason: e.to_string(),
            })?;

        let rules = if market_config.apply_aliases {
            rules
        } else {
            &no_rules
        };

        let mut market_stats = MarketStats::new(market);
        market_stats.listed = codes.len();

        for code in &codes {
            match resolve_listing(provider, market_config, code).await {
                Ok(listing) => {
                    market_stats.aliases += document.insert_with_aliases(listing, rules);
                    market_stats.collected += 1;
                }
                Err(e) => {
                    market_stats.skipped += 1;
                    tracing::warn!(%market, code = %code, error = %e, "종목 건너뜀");
                }
            }
        }

        tracing::info!(
            %market,
            listed = market_stats.listed,
            collected = market_stats.collected,
            "종목 수집 완료"
        );
        stats.markets.push(market_stats);
    }

    stats.name_entries = document.stock_map.len();
    stats.ticker_entries = document.ticker_to_name.len();
    stats.elapsed = start.elapsed();

    Ok((document, stats))
}

/// 종목 코드 하나를 Listing으로 변환
async fn resolve_listing(
    provider: &dyn ListingProvider,
    market_config: &MarketConfig,
    code: &str,
) -> Result<Listing> {
    let ticker = market_config.ticker(code);

    let name = provider
        .resolve_name(market_config.market, code)
        .await
        .map_err(|e| StockMapError::ListingResolutionFailed {
            ticker: ticker.clone(),
            reason: e.to_string(),
        })?;

    if name.trim().is_empty() {
        return Err(StockMapError::ListingResolutionFailed {
            ticker,
            reason: "빈 종목명".to_string(),
        });
    }

    Ok(Listing::new(ticker, name))
}

/// 수집 전체 실행: 데이터 소스 준비 → 수집 → 파일 저장
///
/// 수집이 실패하면 파일을 쓰지 않으므로 기존 산출물이 그대로 남습니다.
pub async fn run_collect(config: &CollectorConfig) -> Result<CollectionStats> {
    let rules = match &config.alias_file {
        Some(path) => AliasRules::from_toml_file(path)?,
        None => AliasRules::default(),
    };
    let provider = build_provider(&config.source)?;
    let base_date = config.resolve_base_date();

    let (document, stats) =
        collect_document(provider.as_ref(), &config.markets, &rules, base_date).await?;

    if document.stocks.is_empty() {
        tracing::warn!("수집된 종목이 없습니다. 빈 매핑을 저장합니다");
    }

    document.save(&config.output_path)?;
    tracing::info!(
        path = %config.output_path.display(),
        stocks = document.stocks.len(),
        "중간 산출물 저장 완료"
    );

    Ok(stats)
}
