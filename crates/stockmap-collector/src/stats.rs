//! 수집 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use stockmap_core::Market;

/// 시장별 수집 통계
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStats {
    pub market: Market,
    /// 조회된 종목 수
    pub listed: usize,
    /// 매핑에 추가된 종목 수
    pub collected: usize,
    /// 종목명 조회 실패로 건너뛴 수
    pub skipped: usize,
    /// 등록된 별칭 수 (덮어쓴 별칭 포함)
    pub aliases: usize,
}

impl MarketStats {
    pub fn new(market: Market) -> Self {
        Self {
            market,
            listed: 0,
            collected: 0,
            skipped: 0,
            aliases: 0,
        }
    }
}

/// 수집 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 시장별 통계 (수집 순서)
    pub markets: Vec<MarketStats>,
    /// `stock_map` 엔트리 수
    pub name_entries: usize,
    /// `ticker_to_name` 엔트리 수
    pub ticker_entries: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 조회된 전체 종목 수
    pub fn total(&self) -> usize {
        self.markets.iter().map(|m| m.listed).sum()
    }

    /// 수집 성공 종목 수
    pub fn success(&self) -> usize {
        self.markets.iter().map(|m| m.collected).sum()
    }

    /// 건너뛴 종목 수
    pub fn skipped(&self) -> usize {
        self.markets.iter().map(|m| m.skipped).sum()
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.success() as f64 / total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        for market in &self.markets {
            tracing::info!(
                market = %market.market,
                listed = market.listed,
                collected = market.collected,
                skipped = market.skipped,
                aliases = market.aliases,
                "시장별 수집 결과"
            );
        }

        tracing::info!(
            operation = operation,
            total = self.total(),
            success = self.success(),
            skipped = self.skipped(),
            name_entries = self.name_entries,
            ticker_entries = self.ticker_entries,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}
