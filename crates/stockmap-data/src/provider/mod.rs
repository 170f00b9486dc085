//! 종목 목록 Provider.
//!
//! 수집기는 두 가지 연산만 필요로 합니다:
//! - 시장별 현재 상장 종목 코드 목록
//! - 종목 코드 → 종목명
//!
//! 이 계약을 만족하는 소스라면 무엇이든 교체해서 사용할 수 있습니다.

pub mod krx;
pub mod snapshot;

pub use krx::{KrxListingProvider, KrxOptions};
pub use snapshot::SnapshotListingProvider;

use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use stockmap_core::Market;

/// 종목 목록 Provider trait.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// 기준일에 상장된 종목 코드 목록 (접미사 없는 6자리 코드).
    async fn list_tickers(&self, market: Market, base_date: NaiveDate) -> Result<Vec<String>>;

    /// 종목 코드의 종목명.
    async fn resolve_name(&self, market: Market, code: &str) -> Result<String>;
}
