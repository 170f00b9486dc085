//! 데이터 소스 오류 타입.

use thiserror::Error;

/// 데이터 소스 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 클라이언트 생성 실패
    #[error("HTTP client error: {0}")]
    ClientError(String),

    /// 요청 실패 (네트워크, 비정상 상태 코드)
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 응답 파싱 실패
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 종목 또는 시장을 찾을 수 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 스냅샷 파일 읽기 실패
    #[error("Snapshot error: {0}")]
    SnapshotError(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DataError::ParseError(err.to_string())
        } else {
            DataError::FetchError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
