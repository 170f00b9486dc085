//! 수집기 통합 테스트

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;
use stockmap_collector::{
    collect_document, run_collect, CollectorConfig, MarketConfig, SourceConfig,
};
use stockmap_core::{AliasRules, InterchangeDocument, Listing, Market, StockMapError};
use stockmap_data::{DataError, ListingProvider};

/// 호출 기록을 남기는 테스트용 Provider
#[derive(Default)]
struct FakeProvider {
    listings: HashMap<Market, Vec<(&'static str, &'static str)>>,
    failing_market: Option<Market>,
    failing_code: Option<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn with(mut self, market: Market, listings: Vec<(&'static str, &'static str)>) -> Self {
        self.listings.insert(market, listings);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingProvider for FakeProvider {
    fn name(&self) -> &str {
        "Fake"
    }

    async fn list_tickers(
        &self,
        market: Market,
        _base_date: NaiveDate,
    ) -> stockmap_data::Result<Vec<String>> {
        self.calls.lock().unwrap().push(format!("list:{}", market));
        if self.failing_market == Some(market) {
            return Err(DataError::FetchError("connection reset".to_string()));
        }
        Ok(self
            .listings
            .get(&market)
            .map(|l| l.iter().map(|(code, _)| code.to_string()).collect())
            .unwrap_or_default())
    }

    async fn resolve_name(&self, market: Market, code: &str) -> stockmap_data::Result<String> {
        self.calls.lock().unwrap().push(format!("name:{}", code));
        if self.failing_code == Some(code) {
            return Err(DataError::FetchError("timeout".to_string()));
        }
        self.listings
            .get(&market)
            .and_then(|l| l.iter().find(|(c, _)| *c == code))
            .map(|(_, name)| name.to_string())
            .ok_or_else(|| DataError::NotFound(code.to_string()))
    }
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn default_markets() -> Vec<MarketConfig> {
    CollectorConfig::default().markets
}

#[tokio::test]
async fn test_single_listing_document() {
    let provider = FakeProvider::default()
        .with(Market::Kospi, vec![("005930", "삼성전자")])
        .with(Market::Kosdaq, vec![]);

    let (document, stats) = collect_document(
        &provider,
        &default_markets(),
        &AliasRules::default(),
        base_date(),
    )
    .await
    .unwrap();

    assert_eq!(document.stocks, vec![Listing::new("005930.KS", "삼성전자")]);
    assert_eq!(document.stock_map.len(), 1);
    assert_eq!(document.stock_map["삼성전자"], "005930.KS");
    assert_eq!(document.ticker_to_name.len(), 1);
    assert_eq!(document.ticker_to_name["005930.KS"], "삼성전자");

    assert_eq!(stats.total(), 1);
    assert_eq!(stats.success(), 1);
    assert_eq!(stats.name_entries, 1);
}

#[tokio::test]
async fn test_first_market_failure_aborts_run() {
    let provider = FakeProvider {
        failing_market: Some(Market::Kospi),
        ..Default::default()
    }
    .with(Market::Kosdaq, vec![("035720", "카카오")]);

    let err = collect_document(
        &provider,
        &default_markets(),
        &AliasRules::default(),
        base_date(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        StockMapError::ExchangeFetchFailed { ref market, .. } if market == "KOSPI"
    ));
    // KOSDAQ는 조회하지 않음
    assert_eq!(provider.calls(), vec!["list:KOSPI"]);
}

#[tokio::test]
async fn test_second_market_failure_aborts_after_first_succeeds() {
    let provider = FakeProvider {
        failing_market: Some(Market::Kosdaq),
        ..Default::default()
    }
    .with(Market::Kospi, vec![("005930", "삼성전자")]);

    let err = collect_document(
        &provider,
        &default_markets(),
        &AliasRules::default(),
        base_date(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        StockMapError::ExchangeFetchFailed { ref market, .. } if market == "KOSDAQ"
    ));
    assert_eq!(
        provider.calls(),
        vec!["list:KOSPI", "name:005930", "list:KOSDAQ"]
    );
}

#[tokio::test]
async fn test_canonical_name_is_stored_verbatim() {
    let provider = FakeProvider::default()
        .with(Market::Kospi, vec![("005930", " 삼성전자 "), ("000660", "   ")])
        .with(Market::Kosdaq, vec![]);

    let (document, stats) = collect_document(
        &provider,
        &default_markets(),
        &AliasRules::default(),
        base_date(),
    )
    .await
    .unwrap();

    assert_eq!(document.stocks, vec![Listing::new("005930.KS", " 삼성전자 ")]);
    assert_eq!(document.stock_map[" 삼성전자 "], "005930.KS");
    assert_eq!(document.ticker_to_name["005930.KS"], " 삼성전자 ");
    // 공백뿐인 종목명은 건너뜀
    assert!(!document.ticker_to_name.contains_key("000660.KS"));
    assert_eq!(stats.markets[0].skipped, 1);
}

#[tokio::test]
async fn test_name_failure_skips_single_ticker() {
    let provider = FakeProvider {
        failing_code: Some("000660"),
        ..Default::default()
    }
    .with(
        Market::Kospi,
        vec![("005930", "삼성전자"), ("000660", "SK하이닉스"), ("035420", "NAVER")],
    )
    .with(Market::Kosdaq, vec![("035720", "카카오")]);

    let (document, stats) = collect_document(
        &provider,
        &default_markets(),
        &AliasRules::default(),
        base_date(),
    )
    .await
    .unwrap();

    let tickers: Vec<_> = document.stocks.iter().map(|s| s.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["005930.KS", "035420.KS", "035720.KS"]);
    assert!(!document.stock_map.contains_key("하이닉스"));
    assert_eq!(stats.markets[0].skipped, 1);
    assert_eq!(stats.markets[0].collected, 2);
    assert_eq!(stats.skipped(), 1);
}

#[tokio::test]
async fn test_aliases_follow_market_flag() {
    let provider = FakeProvider::default()
        .with(
            Market::Kospi,
            vec![("000660", "SK하이닉스"), ("005380", "현대자동차")],
        )
        .with(Market::Kosdaq, vec![("001230", "LG에너지테크")]);

    let (document, stats) = collect_document(
        &provider,
        &default_markets(),
        &AliasRules::default(),
        base_date(),
    )
    .await
    .unwrap();

    assert_eq!(document.stock_map["하이닉스"], "000660.KS");
    assert_eq!(document.stock_map["현대차"], "005380.KS");
    // KOSDAQ 종목은 기본적으로 별칭 규칙을 적용하지 않음
    assert!(!document.stock_map.contains_key("LGES"));
    assert_eq!(stats.markets[0].aliases, 2);
    assert_eq!(stats.markets[1].aliases, 0);

    let markets: Vec<_> = default_markets()
        .into_iter()
        .map(|m| MarketConfig {
            apply_aliases: true,
            ..m
        })
        .collect();
    let (document, _) = collect_document(&provider, &markets, &AliasRules::default(), base_date())
        .await
        .unwrap();
    assert_eq!(document.stock_map["LGES"], "001230.KS");
}

#[tokio::test]
async fn test_kospi_listings_precede_kosdaq() {
    let provider = FakeProvider::default()
        .with(Market::Kospi, vec![("900000", "가")])
        .with(Market::Kosdaq, vec![("000001", "나")]);

    let (document, _) = collect_document(
        &provider,
        &default_markets(),
        &AliasRules::default(),
        base_date(),
    )
    .await
    .unwrap();

    assert_eq!(
        document.stocks,
        vec![Listing::new("900000.KS", "가"), Listing::new("000001.KS", "나")]
    );
}

#[tokio::test]
async fn test_run_collect_from_snapshot_writes_document() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    std::fs::write(
        &snapshot,
        r#"{"KOSPI": {"005930": "삼성전자", "000660": "SK하이닉스"}, "KOSDAQ": {"035720": "카카오"}}"#,
    )
    .unwrap();

    let config = CollectorConfig {
        output_path: dir.path().join("out/korean_stocks_data.json"),
        base_date: Some(base_date()),
        source: SourceConfig::Snapshot(snapshot),
        ..Default::default()
    };

    let stats = run_collect(&config).await.unwrap();
    assert_eq!(stats.success(), 3);

    let document = InterchangeDocument::load(&config.output_path).unwrap();
    assert_eq!(document.stocks.len(), 3);
    assert_eq!(document.stock_map["하이닉스"], "000660.KS");
    assert_eq!(document.ticker_to_name["035720.KS"], "카카오");

    let raw = std::fs::read_to_string(&config.output_path).unwrap();
    assert!(raw.contains("삼성전자"));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value["stocks"].is_array());
}

#[tokio::test]
async fn test_run_collect_failure_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    // KOSPI 누락 → 첫 시장 조회 실패
    std::fs::write(&snapshot, r#"{"KOSDAQ": {"035720": "카카오"}}"#).unwrap();

    let config = CollectorConfig {
        output_path: dir.path().join("korean_stocks_data.json"),
        base_date: Some(base_date()),
        source: SourceConfig::Snapshot(snapshot),
        ..Default::default()
    };

    let err = run_collect(&config).await.unwrap_err();
    assert!(matches!(err, StockMapError::ExchangeFetchFailed { .. }));
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn test_run_collect_missing_snapshot_is_dependency_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = CollectorConfig {
        output_path: dir.path().join("korean_stocks_data.json"),
        source: SourceConfig::Snapshot(dir.path().join("missing.json")),
        ..Default::default()
    };

    let err = run_collect(&config).await.unwrap_err();
    assert!(matches!(err, StockMapError::DependencyUnavailable(_)));
    assert!(!config.output_path.exists());
}

#[tokio::test]
async fn test_second_market_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot.json");
    // KOSPI는 정상, KOSDAQ 누락 → 두 번째 시장 조회 실패
    std::fs::write(&snapshot, r#"{"KOSPI": {"005930": "삼성전자"}}"#).unwrap();

    let config = CollectorConfig {
        output_path: dir.path().join("korean_stocks_data.json"),
        base_date: Some(base_date()),
        source: SourceConfig::Snapshot(snapshot),
        ..Default::default()
    };

    let err = run_collect(&config).await.unwrap_err();
    assert!(matches!(
        err,
        StockMapError::ExchangeFetchFailed { ref market, .. } if market == "KOSDAQ"
    ));
    assert!(!config.output_path.exists());
}
