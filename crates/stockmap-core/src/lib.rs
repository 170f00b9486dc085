//! # StockMap Core
//!
//! 한국 주식 종목명-티커 매핑 생성기의 핵심 타입을 제공합니다:
//! - 시장 구분 및 종목(Listing) 모델
//! - 중간 산출물(InterchangeDocument)과 두 개의 매핑
//! - 별칭 규칙 (종목명 패턴 → 별칭)
//! - 에러 타입
//! - 환경변수 설정 헬퍼
//! - 로깅 인프라

pub mod alias;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod market;

pub use alias::{AliasRule, AliasRules, NamePattern};
pub use document::{write_atomic, InterchangeDocument, Listing, NameToTickerMap, TickerToNameMap};
pub use error::{Result, StockMapError};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use market::Market;
