//! 종목 목록 수집기.
//!
//! KOSPI → KOSDAQ 순서로 상장 종목을 조회하여
//! 종목명/별칭 → 티커, 티커 → 종목명 매핑을 만들고
//! 중간 산출물(JSON)로 저장합니다.

pub mod collect;
pub mod config;
pub mod stats;

pub use collect::{build_provider, collect_document, run_collect};
pub use config::{CollectorConfig, MarketConfig, SourceConfig};
pub use stats::{CollectionStats, MarketStats};
