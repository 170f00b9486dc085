//! 시장 구분.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 수집 대상 시장.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    /// 유가증권시장
    Kospi,
    /// 코스닥
    Kosdaq,
}

impl Market {
    /// 수집 순서 (KOSPI 전체 → KOSDAQ 전체)
    pub const ALL: [Market; 2] = [Market::Kospi, Market::Kosdaq];

    /// KRX 시장 ID (`mktId` 파라미터)
    pub fn krx_id(&self) -> &'static str {
        match self {
            Market::Kospi => "STK",
            Market::Kosdaq => "KSQ",
        }
    }

    /// 표시용 이름
    pub fn label(&self) -> &'static str {
        match self {
            Market::Kospi => "KOSPI",
            Market::Kosdaq => "KOSDAQ",
        }
    }

    /// 기본 티커 접미사.
    ///
    /// 매핑을 사용하는 앱이 점 없는 코드를 `.KS`로 정규화하므로
    /// 두 시장 모두 `.KS`를 사용합니다.
    pub fn default_suffix(&self) -> &'static str {
        ".KS"
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "KOSPI" | "STK" => Ok(Market::Kospi),
            "KOSDAQ" | "KSQ" => Ok(Market::Kosdaq),
            _ => Err(format!("Unknown market: {}", s)),
        }
    }
}
