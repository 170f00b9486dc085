//! 종목 목록 데이터 소스.
//!
//! - `KrxListingProvider`: 한국거래소 정보데이터시스템 (data.krx.co.kr)
//! - `SnapshotListingProvider`: 고정 JSON 스냅샷 (오프라인/테스트용)

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{KrxListingProvider, KrxOptions, ListingProvider, SnapshotListingProvider};
