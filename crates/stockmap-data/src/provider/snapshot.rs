//! 고정 스냅샷 Provider.
//!
//! 시장별 `종목 코드 → 종목명` JSON 파일을 데이터 소스로 사용합니다.
//! 네트워크 없이 매핑을 재생성하거나 테스트할 때 씁니다.
//!
//! ```json
//! {
//!   "KOSPI": { "005930": "삼성전자" },
//!   "KOSDAQ": { "035720": "카카오" }
//! }
//! ```

use super::ListingProvider;
use crate::{DataError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use stockmap_core::Market;

/// 스냅샷 기반 Provider.
///
/// 스냅샷에 없는 시장은 목록 조회 실패로 처리합니다.
#[derive(Debug, Clone, Default)]
pub struct SnapshotListingProvider {
    markets: HashMap<Market, BTreeMap<String, String>>,
}

impl SnapshotListingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 시장 하나의 종목을 추가합니다.
    pub fn with_market<I, C, N>(mut self, market: Market, listings: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: Into<String>,
        N: Into<String>,
    {
        self.markets.insert(
            market,
            listings
                .into_iter()
                .map(|(code, name)| (code.into(), name.into()))
                .collect(),
        );
        self
    }

    /// JSON 문자열에서 로드
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(content)?;

        let mut markets = HashMap::new();
        for (key, listings) in raw {
            let market: Market = key.parse().map_err(DataError::SnapshotError)?;
            markets.insert(market, listings);
        }
        Ok(Self { markets })
    }

    /// JSON 파일에서 로드
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataError::SnapshotError(format!("{}: {}", path.display(), e)))?;
        let provider = Self::from_json_str(&content)?;

        tracing::info!(
            path = %path.display(),
            markets = provider.markets.len(),
            "스냅샷 로드"
        );
        Ok(provider)
    }

    fn market(&self, market: Market) -> Result<&BTreeMap<String, String>> {
        self.markets
            .get(&market)
            .ok_or_else(|| DataError::NotFound(format!("스냅샷에 {} 없음", market)))
    }
}

#[async_trait]
impl ListingProvider for SnapshotListingProvider {
    fn name(&self) -> &str {
        "Snapshot"
    }

    async fn list_tickers(&self, market: Market, _base_date: NaiveDate) -> Result<Vec<String>> {
        Ok(self.market(market)?.keys().cloned().collect())
    }

    async fn resolve_name(&self, market: Market, code: &str) -> Result<String> {
        self.market(market)?
            .get(code)
            .cloned()
            .ok_or_else(|| DataError::NotFound(format!("{} {}", market, code)))
    }
}
