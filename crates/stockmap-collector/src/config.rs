//! 환경변수 기반 수집 설정.

use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;
use stockmap_core::config::{env_var_bool, env_var_parse, env_var_path, env_var_string};
use stockmap_core::{Market, Result, StockMapError};
use stockmap_data::KrxOptions;

/// 중간 산출물 기본 경로
pub const DEFAULT_DATA_PATH: &str = "scripts/korean_stocks_data.json";

/// 수집 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 중간 산출물(JSON) 저장 경로
    pub output_path: PathBuf,
    /// 기준일 (None이면 오늘)
    pub base_date: Option<NaiveDate>,
    /// 데이터 소스
    pub source: SourceConfig,
    /// 수집 대상 시장 (수집 순서)
    pub markets: Vec<MarketConfig>,
    /// 별칭 규칙 파일 (None이면 기본 규칙)
    pub alias_file: Option<PathBuf>,
}

/// 데이터 소스 설정
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// KRX 정보데이터시스템
    Krx(KrxOptions),
    /// 고정 스냅샷 파일
    Snapshot(PathBuf),
}

/// 시장별 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    pub market: Market,
    /// 종목 코드 뒤에 붙일 접미사
    pub suffix: String,
    /// 별칭 규칙 적용 여부
    pub apply_aliases: bool,
}

impl MarketConfig {
    pub fn new(market: Market, apply_aliases: bool) -> Self {
        Self {
            market,
            suffix: market.default_suffix().to_string(),
            apply_aliases,
        }
    }

    /// 종목 코드 → 접미사가 붙은 티커
    pub fn ticker(&self, code: &str) -> String {
        format!("{}{}", code, self.suffix)
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_DATA_PATH),
            base_date: None,
            source: SourceConfig::Krx(KrxOptions::default()),
            markets: vec![
                MarketConfig::new(Market::Kospi, true),
                MarketConfig::new(Market::Kosdaq, false),
            ],
            alias_file: None,
        }
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = KrxOptions::default();
        let source = match env_var_path("STOCKMAP_SNAPSHOT_PATH") {
            Some(path) => SourceConfig::Snapshot(path),
            None => SourceConfig::Krx(KrxOptions {
                base_url: env_var_string("KRX_BASE_URL", &defaults.base_url),
                timeout: Duration::from_secs(env_var_parse(
                    "KRX_TIMEOUT_SECS",
                    defaults.timeout.as_secs(),
                )),
                lookback_days: env_var_parse("KRX_LOOKBACK_DAYS", defaults.lookback_days),
            }),
        };

        let base_date = match std::env::var("STOCKMAP_BASE_DATE") {
            Ok(value) if !value.trim().is_empty() => Some(parse_base_date(&value)?),
            _ => None,
        };

        Ok(Self {
            output_path: env_var_path("STOCKMAP_DATA_PATH")
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            base_date,
            source,
            markets: vec![
                MarketConfig {
                    market: Market::Kospi,
                    suffix: env_var_string("STOCKMAP_KOSPI_SUFFIX", Market::Kospi.default_suffix()),
                    apply_aliases: env_var_bool("STOCKMAP_KOSPI_ALIASES", true),
                },
                MarketConfig {
                    market: Market::Kosdaq,
                    suffix: env_var_string(
                        "STOCKMAP_KOSDAQ_SUFFIX",
                        Market::Kosdaq.default_suffix(),
                    ),
                    apply_aliases: env_var_bool("STOCKMAP_KOSDAQ_ALIASES", false),
                },
            ],
            alias_file: env_var_path("STOCKMAP_ALIAS_FILE"),
        })
    }

    /// 기준일 (설정이 없으면 오늘)
    pub fn resolve_base_date(&self) -> NaiveDate {
        self.base_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// `YYYYMMDD` 또는 `YYYY-MM-DD` 형식의 기준일 파싱
pub fn parse_base_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map_err(|_| StockMapError::Config(format!("잘못된 기준일: {}", value)))
}
