//! 매핑 생성 파이프라인의 에러 타입.
//!
//! 수집(collect)과 렌더링(render) 단계가 공유하는 에러 분류입니다.
//! `ListingResolutionFailed`만 복구 가능하며 (해당 종목만 건너뜀),
//! 나머지는 실행 중인 단계를 즉시 종료시킵니다.

use std::path::PathBuf;
use thiserror::Error;

/// 파이프라인 에러.
#[derive(Debug, Error)]
pub enum StockMapError {
    /// 데이터 Provider를 생성할 수 없음 (작업 시작 전 실패)
    #[error("데이터 소스 사용 불가: {0}")]
    DependencyUnavailable(String),

    /// 시장 전체 종목 목록 조회 실패
    #[error("{market} 종목 목록 조회 실패: {reason}")]
    ExchangeFetchFailed { market: String, reason: String },

    /// 개별 종목명 조회 실패
    #[error("종목명 조회 실패 ({ticker}): {reason}")]
    ListingResolutionFailed { ticker: String, reason: String },

    /// 문서 입출력 실패
    #[error("파일 입출력 실패 ({}): {source}", .path.display())]
    DocumentIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 문서 형식 오류
    #[error("JSON 형식 오류 ({}): {source}", .path.display())]
    DocumentFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),
}

impl StockMapError {
    /// 실행 전체를 중단해야 하는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ListingResolutionFailed { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DocumentIo {
            path: path.into(),
            source,
        }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, StockMapError>;
